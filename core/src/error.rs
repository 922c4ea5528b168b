use std::num::ParseIntError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StudyError>;

/// Failures raised by the core. All of them are recoverable at the call site.
#[derive(Debug, Error)]
pub enum StudyError {
    /// Text did not look like a verse reference.
    #[error("unable to parse verse reference '{input}'")]
    Parse { input: String },

    /// A mapping token carried a word index that is not a number.
    #[error("malformed word index in mapping token '{token}'")]
    Alignment {
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// A book, mapping record or dictionary record does not exist.
    #[error("{what} not found: {key}")]
    LookupMiss { what: &'static str, key: String },

    /// None of the filter keywords named a book, testament or category.
    #[error("no filter keyword matched a book, testament or category")]
    FilterIndexEmpty,

    #[error("invalid strongs number '{0}'")]
    InvalidStrongs(String),

    #[error("invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid settings file: {0}")]
    Settings(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StudyError {
    pub fn parse(input: impl Into<String>) -> Self {
        Self::Parse { input: input.into() }
    }

    pub fn lookup_miss(what: &'static str, key: impl Into<String>) -> Self {
        Self::LookupMiss { what, key: key.into() }
    }

    /// True for the "not found" family, which callers report without alarm.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, Self::LookupMiss { .. })
    }
}
