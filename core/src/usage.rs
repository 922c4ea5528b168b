//! Finding verses whose mapping record uses a given Strong's number.

use lazy_static::lazy_static;
use regex::Regex;
use std::io;

use crate::filter::Resolution;
use crate::records::grep;
use crate::strongs::StrongsNumber;
use crate::taxonomy::normalize_keyword;
use crate::{Result, StudyError};

lazy_static! {
    static ref USAGE_RE: Regex = Regex::new(r"^[gh]\d+\s.*\bsearch\b").expect("valid regex");
    static ref NUMBERED_BOOK_RE: Regex = Regex::new(r" ([123]) ([a-z])").expect("valid regex");
    static ref TESTAMENT_RE: Regex = Regex::new(r" (old|new) tes[a-z]*").expect("valid regex");
}

/// `g4982 search gospels`: a number plus zero or more filter keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageQuery {
    pub strongs: StrongsNumber,
    pub filters: Vec<String>,
}

impl UsageQuery {
    pub fn matches(text: &str) -> bool {
        USAGE_RE.is_match(&normalize_keyword(text))
    }

    /// "1 kings" becomes "1kings" and "old testament" becomes "old" before
    /// the filter words are split out.
    pub fn parse(text: &str) -> Result<Self> {
        let text = normalize_keyword(text);
        let text = NUMBERED_BOOK_RE.replace_all(&text, " $1$2");
        let text = TESTAMENT_RE.replace_all(&text, " $1");

        let mut words = text.split_whitespace();
        let strongs: StrongsNumber = words
            .next()
            .ok_or_else(|| StudyError::InvalidStrongs(String::new()))?
            .parse()?;
        let filters = words
            .skip_while(|w| *w != "search")
            .skip(1)
            .map(str::to_string)
            .collect();
        Ok(Self { strongs, filters })
    }
}

/// Matching references, capped, plus how many there were in total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageMatches {
    pub total: usize,
    pub verses: Vec<String>,
}

impl UsageMatches {
    pub fn is_truncated(&self) -> bool {
        self.total > self.verses.len()
    }

    /// The verses as one passage query.
    pub fn passage_query(&self) -> String {
        self.verses.join("; ")
    }
}

/// Pattern finding `strongs` inside a mapping tag, e.g. `[<+]4982[+>]`.
pub fn usage_pattern(strongs: StrongsNumber) -> Result<Regex> {
    Ok(Regex::new(&format!(r"[<+]{}[+>]", strongs.mapping_digits()))?)
}

/// Scan mapping records for `strongs`, keeping books `books` allows and at
/// most `limit` references.
pub fn find_usages<I>(
    lines: I,
    strongs: StrongsNumber,
    books: &Resolution,
    limit: usize,
) -> Result<UsageMatches>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut found = UsageMatches::default();
    if matches!(books, Resolution::Books(b) if b.is_empty()) {
        return Ok(found);
    }

    for line in grep(lines, usage_pattern(strongs)?) {
        let line = line?;
        let Some((code, reference)) = record_reference(&line) else {
            continue;
        };
        if !books.allows(code) {
            continue;
        }
        found.total += 1;
        if found.verses.len() < limit {
            found.verses.push(reference.to_string());
        }
    }
    tracing::debug!(%strongs, total = found.total, "usage search complete");
    Ok(found)
}

/// `$Gen 2:11\t...` gives `("Gen", "Gen 2:11")`.
fn record_reference(line: &str) -> Option<(&str, &str)> {
    let (reference, _) = line.strip_prefix('$')?.split_once('\t')?;
    let code = reference.split(' ').next()?;
    Some((code, reference))
}
