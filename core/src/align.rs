//! Interlinear alignment of English verse text against a mapping record.
//!
//! A mapping record is a whitespace separated list of tokens such as
//! `01=<3972>` or `12+13=<2596>`. The number left of `=` is the 1-based
//! position of the English word that closes a group (for `a+b` only the last
//! position counts); the right side carries the Strong's number(s).
//!
//! A token without exactly one `=` is skipped but stays current, so every
//! word after it is left unaligned. This is logged at debug level.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::strongs::Language;
use crate::{Result, StudyError};

lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(r"[0-9]+").expect("valid regex");
}

/// A run of English words and the Strong's numbers it translates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSegment {
    pub english: String,
    /// Rendered numbers, e.g. `["G2596"]` or `["H1254", "H853"]`.
    pub strongs: Vec<String>,
}

impl AlignedSegment {
    pub fn label(&self) -> String {
        self.strongs.join(" ")
    }
}

/// Aligned segments plus the column width used to right-align them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interlinear {
    segments: Vec<AlignedSegment>,
    width: usize,
}

impl Interlinear {
    pub fn segments(&self) -> &[AlignedSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Widest English run, in characters.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Each segment left-padded to the widest run, a space, then its label.
    pub fn lines(&self) -> Vec<String> {
        self.segments
            .iter()
            .map(|s| {
                let line = format!("{:>width$} {}", s.english, s.label(), width = self.width);
                line.trim_end().to_string()
            })
            .collect()
    }
}

impl fmt::Display for Interlinear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Align `english_text` against `mapping_line`. English words past the last
/// mapping token that closes a group are dropped.
pub fn align(english_text: &str, mapping_line: &str, is_new_testament: bool) -> Result<Interlinear> {
    let words: Vec<&str> = english_text.split_whitespace().collect();
    let tokens: Vec<&str> = mapping_line.split_whitespace().collect();
    let language = Language::from_new_testament(is_new_testament);

    if tokens.is_empty() {
        return Ok(Interlinear::default());
    }

    if let Some(bad) = tokens.iter().find(|t| split_token(t).is_none()) {
        tracing::debug!(token = %bad, "malformed mapping token; words after it stay unaligned");
    }

    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut run: Vec<&str> = Vec::new();
    for (ix, &word) in words.iter().enumerate() {
        let position = ix + 1;
        run.push(word);

        let token = tokens[cursor];
        let Some((index_part, tag)) = split_token(token) else {
            continue;
        };
        if word_index(token, index_part)? != position {
            continue;
        }

        segments.push(AlignedSegment { english: run.join(" "), strongs: render_tag(tag, language) });
        run.clear();
        // stay on the last token so trailing words have somewhere to go
        if cursor + 1 < tokens.len() {
            cursor += 1;
        }
    }

    if !run.is_empty() {
        tracing::debug!(dropped = run.len(), "english words left without a mapping token");
    }

    let width = segments.iter().map(|s| s.english.chars().count()).max().unwrap_or(0);
    Ok(Interlinear { segments, width })
}

fn split_token(token: &str) -> Option<(&str, &str)> {
    let mut parts = token.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(index), Some(tag), None) => Some((index, tag)),
        _ => None,
    }
}

fn word_index(token: &str, index_part: &str) -> Result<usize> {
    let last = index_part.rsplit('+').next().unwrap_or(index_part);
    last.parse().map_err(|source| StudyError::Alignment { token: token.to_string(), source })
}

/// `<1111>`, `<1111+2222>` and `<1111>+<2222>` become prefixed numbers.
fn render_tag(tag: &str, language: Language) -> Vec<String> {
    NUMBER_RE
        .find_iter(tag)
        .map(|m| format!("{}{}", language.prefix(), m.as_str()))
        .collect()
}
