use lazy_static::lazy_static;
use regex::Regex;
use std::io;

use crate::align::{align, Interlinear};
use crate::records::grep;
use crate::reference::{parse_reference, VerseReference};
use crate::taxonomy::{Book, Registry};
use crate::{Result, StudyError};

/// Copyright marker the passage API appends to every passage.
pub const COPYRIGHT_MARKER: &str = "(ESV)";

lazy_static! {
    static ref VERSE_NUMBER_RE: Regex = Regex::new(r"\[\d+\]").expect("valid regex");
}

/// `$2Ti 1:7`, the prefix of a verse's mapping record.
pub fn mapping_key(book: &Book, reference: &VerseReference) -> String {
    format!("${} {}", book.short_code, reference.canonical_chapter_verse())
}

/// Payload of the first mapping record for `key`, with the key stripped.
pub fn find_mapping_record<I>(lines: I, key: &str) -> Result<String>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let prefix = format!("{key}\t");
    let pattern = Regex::new(&format!("^{}", regex::escape(&prefix)))?;
    if let Some(line) = grep(lines, pattern).next() {
        let line = line?;
        tracing::debug!(%key, "found mapping record");
        return Ok(line[prefix.len()..].to_string());
    }
    Err(StudyError::lookup_miss("translation mapping", key.trim_start_matches('$')))
}

/// Verse prose from an API passage: the heading line is dropped, the rest
/// joined on one line without the copyright or `[N]` verse markers.
pub fn verse_text(passage: &str) -> String {
    let body = passage
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let body = body.replacen(COPYRIGHT_MARKER, "", 1);
    let body = VERSE_NUMBER_RE.replace_all(&body, "");
    body.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Interlinear rendering of one passage. `canonical_ref` is the reference
/// the passage API answered with, e.g. "2 Timothy 1:7".
pub fn annotate_passage<I>(
    registry: &Registry,
    canonical_ref: &str,
    passage: &str,
    mapping_lines: I,
) -> Result<Interlinear>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let reference = parse_reference(canonical_ref)?;
    let book = registry.lookup(&reference.book)?;
    let record = find_mapping_record(mapping_lines, &mapping_key(book, &reference))?;
    align(&verse_text(passage), &record, book.is_new_testament())
}
