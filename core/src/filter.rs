use crate::taxonomy::{normalize_keyword, FilterIndex};
use crate::{Result, StudyError};

/// Outcome of resolving filter keywords against the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No keyword named anything in the index.
    NoMatch,
    /// Books selected by every matched keyword, in first-keyword order. May be
    /// empty when the keywords contradict each other.
    Books(Vec<&'static str>),
}

impl Resolution {
    /// Whether a short code passes the filter. `NoMatch` restricts nothing.
    pub fn allows(&self, short_code: &str) -> bool {
        match self {
            Resolution::NoMatch => true,
            Resolution::Books(books) => books.contains(&short_code),
        }
    }

    pub fn into_books(self) -> Result<Vec<&'static str>> {
        match self {
            Resolution::NoMatch => Err(StudyError::FilterIndexEmpty),
            Resolution::Books(books) => Ok(books),
        }
    }
}

/// Intersect the book sets named by `keywords`. Unknown keywords are skipped;
/// the scan stops as soon as the intersection is empty.
pub fn resolve<S: AsRef<str>>(keywords: &[S], index: &FilterIndex) -> Resolution {
    let mut keep: Option<Vec<&'static str>> = None;

    for keyword in keywords {
        let keyword = normalize_keyword(keyword.as_ref());
        let Some(books) = index.get(&keyword) else {
            tracing::debug!(%keyword, "filter keyword not in index");
            continue;
        };

        let next = match keep.take() {
            None => books.to_vec(),
            Some(mut current) => {
                current.retain(|code| books.contains(code));
                current
            }
        };
        tracing::debug!(%keyword, remaining = next.len(), "applied filter keyword");

        let exhausted = next.is_empty();
        keep = Some(next);
        if exhausted {
            break;
        }
    }

    match keep {
        None => Resolution::NoMatch,
        Some(books) => Resolution::Books(books),
    }
}
