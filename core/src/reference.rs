use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;

use crate::{Result, StudyError};

lazy_static! {
    // optional ordinal, book words, chapter, optional separator and verse
    static ref VERSE_RE: Regex =
        Regex::new(r"^\s*([0-9]?\s*[A-Za-z]+(?:\s+[A-Za-z]+)*)\s*([0-9]+)(?:([:.])([0-9]*))?")
            .expect("valid regex");
}

/// A book token plus a chapter/verse token, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseReference {
    pub book: String,
    /// Chapter and verse with the separator exactly as typed ("1:7", "3.3", "5").
    pub chapter_verse: String,
    /// `None` when the digits do not fit a `u32`; `chapter_verse` still
    /// carries them for the passage lookup.
    pub chapter: Option<u32>,
    pub verse: Option<u32>,
}

impl VerseReference {
    /// Chapter and verse with a `:` separator, the form used by mapping records.
    pub fn canonical_chapter_verse(&self) -> String {
        self.chapter_verse.replace('.', ":")
    }
}

/// Split free-form text into a book token and a chapter:verse token. Values
/// are not range checked; an impossible verse is left for the passage lookup
/// to reject.
pub fn parse_reference(text: &str) -> Result<VerseReference> {
    let caps = VERSE_RE.captures(text).ok_or_else(|| StudyError::parse(text))?;
    let book = caps[1].trim().to_string();
    let chapter_digits = caps.get(2).ok_or_else(|| StudyError::parse(text))?;
    let end = caps.get(0).map(|m| m.end()).unwrap_or(chapter_digits.end());
    let chapter_verse = text[chapter_digits.start()..end].to_string();

    let chapter = chapter_digits.as_str().parse().ok();
    let verse = caps.get(4).and_then(|m| m.as_str().parse().ok());

    Ok(VerseReference { book, chapter_verse, chapter, verse })
}

const PROVERBS_CHAPTER_LENGTHS: [u32; 31] = [
    33, 22, 35, 27, 23, 35, 27, 36, 18, 32, 31, 28, 25, 35, 33, 33, 28, 24, 29, 30, 31, 29, 35,
    34, 28, 28, 27, 28, 27, 33, 31,
];

/// Pick a reference to a random verse of Proverbs.
pub fn random_proverb<R: Rng + ?Sized>(rng: &mut R) -> String {
    let ix = rng.gen_range(0..PROVERBS_CHAPTER_LENGTHS.len());
    let verse = rng.gen_range(1..=PROVERBS_CHAPTER_LENGTHS[ix]);
    format!("Proverbs {}:{}", ix + 1, verse)
}
