//! Declarations: personal rewordings of verses, one per line in a flat file,
//! each ending in `.  - Reference`.

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use std::io;

pub const DECLARATION_WIDTH: usize = 37;

lazy_static! {
    static ref REFERENCE_RE: Regex = Regex::new(r"\.\s+-").expect("valid regex");
}

/// One line chosen uniformly at random in a single pass. `None` when there
/// are no non-blank lines.
pub fn random_line<I, R>(lines: I, rng: &mut R) -> io::Result<Option<String>>
where
    I: IntoIterator<Item = io::Result<String>>,
    R: Rng + ?Sized,
{
    let mut chosen = None;
    let mut seen = 0u64;
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        seen += 1;
        if rng.gen_range(0..seen) == 0 {
            chosen = Some(line);
        }
    }
    Ok(chosen)
}

/// Put the reference on its own indented line, wrap to `width` and frame
/// with `=` borders.
pub fn format_declaration(line: &str, width: usize) -> String {
    let split = REFERENCE_RE.replace_all(line.trim(), ".\n    -");
    let border = "=".repeat(width);
    let mut out = vec![border.clone()];
    for paragraph in split.lines() {
        out.extend(wrap(paragraph, width));
    }
    out.push(border);
    out.join("\n")
}

/// Wrap one paragraph, keeping its leading indentation on the first line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let body = text.trim_start();
    let indent = &text[..text.len() - body.len()];
    let options = textwrap::Options::new(width).initial_indent(indent);
    textwrap::wrap(body, options).into_iter().map(|line| line.into_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn reference_moves_to_its_own_line() {
        let text = format_declaration("I stand in grace.  - Rom 5:2", DECLARATION_WIDTH);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "=".repeat(DECLARATION_WIDTH));
        assert_eq!(lines[1], "I stand in grace.");
        assert_eq!(lines[2], "    - Rom 5:2");
        assert_eq!(lines[3], "=".repeat(DECLARATION_WIDTH));
    }

    #[test]
    fn long_lines_wrap_within_width() {
        let text = "I am born of God and the evil one cannot touch me because greater is he";
        for line in wrap(text, 20) {
            assert!(line.chars().count() <= 20, "{line}");
        }
    }

    #[test]
    fn indented_reference_keeps_its_indent() {
        assert_eq!(wrap("    - 1 John 4:19", DECLARATION_WIDTH), vec!["    - 1 John 4:19"]);
        assert!(wrap("", DECLARATION_WIDTH).iter().all(|l| l.is_empty()));
    }

    #[test]
    fn random_line_skips_blanks() {
        let mut rng = StdRng::seed_from_u64(1);
        let lines = vec![Ok(String::new()), Ok("only".to_string()), Ok("  ".to_string())];
        assert_eq!(random_line(lines, &mut rng).unwrap().as_deref(), Some("only"));
        let empty: Vec<io::Result<String>> = vec![];
        assert_eq!(random_line(empty, &mut rng).unwrap(), None);
    }
}
