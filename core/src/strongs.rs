use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::files::{read_lines, DataPaths};
use crate::records::{extract_record, LineFeed};
use crate::{Result, StudyError};

lazy_static! {
    static ref STRONGS_RE: Regex = Regex::new(r"^([gGhH])(\d+)$").expect("valid regex");
}

/// Original language of a Strong's number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Greek,
    Hebrew,
}

impl Language {
    pub fn from_new_testament(is_new_testament: bool) -> Self {
        if is_new_testament {
            Language::Greek
        } else {
            Language::Hebrew
        }
    }

    /// Letter printed in front of rendered numbers.
    pub fn prefix(self) -> char {
        match self {
            Language::Greek => 'G',
            Language::Hebrew => 'H',
        }
    }

    /// Zero padding used by the translation mapping file.
    pub fn mapping_width(self) -> usize {
        match self {
            Language::Greek => 4,
            Language::Hebrew => 5,
        }
    }
}

/// A Strong's number such as `g4982` or `H3068`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrongsNumber {
    pub language: Language,
    pub number: u32,
}

impl StrongsNumber {
    /// Digits zero-padded the way the mapping file writes this language.
    pub fn mapping_digits(&self) -> String {
        format!("{:0width$}", self.number, width = self.language.mapping_width())
    }
}

impl FromStr for StrongsNumber {
    type Err = StudyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let token = s.trim();
        let caps = STRONGS_RE
            .captures(token)
            .ok_or_else(|| StudyError::InvalidStrongs(token.to_string()))?;
        let language = match &caps[1] {
            "g" | "G" => Language::Greek,
            _ => Language::Hebrew,
        };
        let number = caps[2]
            .parse()
            .map_err(|_| StudyError::InvalidStrongs(token.to_string()))?;
        Ok(Self { language, number })
    }
}

impl fmt::Display for StrongsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.language.prefix(), self.number)
    }
}

/// Dictionary lines for one Strong's number, read from the language's file.
pub fn definition(paths: &DataPaths, strongs: StrongsNumber) -> Result<Vec<String>> {
    let path = paths.strongs_dictionary(strongs.language);
    tracing::debug!(%strongs, path = %path.display(), "reading definition");
    let feed = LineFeed::spawn(extract_record(read_lines(&path)?, strongs.number));
    let lines = feed.collect::<std::io::Result<Vec<String>>>()?;
    if lines.is_empty() {
        return Err(StudyError::lookup_miss("definition", strongs.to_string()));
    }
    Ok(lines)
}
