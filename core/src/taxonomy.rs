use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

use crate::{Result, StudyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    /// Keywords that select every book of this testament.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Testament::Old => &["oldtestament", "ot", "old"],
            Testament::New => &["newtestament", "nt", "new"],
        }
    }
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Testament::Old => f.write_str("old testament"),
            Testament::New => f.write_str("new testament"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Law,
    History,
    Poetry,
    Prophesy,
    Gospel,
    Epistle,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Law => "law",
            Category::History => "history",
            Category::Poetry => "poetry",
            Category::Prophesy => "prophesy",
            Category::Gospel => "gospel",
            Category::Epistle => "epistle",
        }
    }

    /// Keywords that select every book of this category.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Category::Law => &["law"],
            Category::History => &["history", "hist", "historical"],
            Category::Poetry => &["poetry", "poet"],
            Category::Prophesy => &["prophesy", "prophetic"],
            Category::Gospel => &["gospel", "gospels"],
            Category::Epistle => &["epistle", "epistles"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One canonical book. `short_code` joins into the translation mapping file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub full_name: &'static str,
    pub short_code: &'static str,
    pub testament: Testament,
    pub category: Category,
    pub aliases: &'static [&'static str],
}

impl Book {
    const fn new(
        full_name: &'static str,
        short_code: &'static str,
        testament: Testament,
        category: Category,
        aliases: &'static [&'static str],
    ) -> Self {
        Self { full_name, short_code, testament, category, aliases }
    }

    pub fn is_new_testament(&self) -> bool {
        self.testament == Testament::New
    }

    /// Every keyword that names this book alone: its aliases plus the
    /// lower-cased full name.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.aliases
            .iter()
            .map(|a| a.to_string())
            .chain(std::iter::once(self.full_name.to_lowercase()))
    }
}

use Category::*;
use Testament::{New, Old};

pub const BOOKS: &[Book] = &[
    Book::new("Genesis", "Gen", Old, Law, &["gen"]),
    Book::new("Exodus", "Exo", Old, Law, &["ex", "exo"]),
    Book::new("Leviticus", "Lev", Old, Law, &["lev"]),
    Book::new("Numbers", "Num", Old, Law, &["nu", "num", "numb"]),
    Book::new("Deuteronomy", "Deu", Old, Law, &["deu", "deut"]),
    Book::new("Joshua", "Jos", Old, History, &["jos", "josh"]),
    Book::new("Judges", "Jdg", Old, History, &["jdg", "judg"]),
    Book::new("Ruth", "Rut", Old, History, &["ru", "rut"]),
    Book::new("1 Samuel", "1Sa", Old, History, &["1sa", "1sam"]),
    Book::new("2 Samuel", "2Sa", Old, History, &["2sa", "2sam"]),
    Book::new("1 Kings", "1Ki", Old, History, &["1ki", "1kin", "1king"]),
    Book::new("2 Kings", "2Ki", Old, History, &["2ki", "2kin", "2king"]),
    Book::new("1 Chronicles", "1Ch", Old, History, &["1chro", "1chron"]),
    Book::new("2 Chronicles", "2Ch", Old, History, &["2chro", "2chron"]),
    Book::new("Ezra", "Ezr", Old, History, &["ez", "ezr"]),
    Book::new("Nehemiah", "Neh", Old, History, &["ne", "neh"]),
    Book::new("Esther", "Est", Old, History, &["es", "est", "esth"]),
    Book::new("Job", "Job", Old, Poetry, &[]),
    Book::new("Psalms", "Psa", Old, Poetry, &["ps", "psa", "psalm"]),
    Book::new("Proverbs", "Pro", Old, Poetry, &["pr", "pro", "prov"]),
    Book::new("Ecclesiastes", "Ecc", Old, Poetry, &["ecc", "ec", "eccles"]),
    Book::new("Song of Solomon", "Song", Old, Poetry, &["song", "song of songs"]),
    Book::new("Isaiah", "Isa", Old, Prophesy, &["is", "isa"]),
    Book::new("Jeremiah", "Jer", Old, Prophesy, &["je", "jer", "jere"]),
    Book::new("Lamentations", "Lam", Old, Prophesy, &["la", "lam", "lamen"]),
    Book::new("Ezekiel", "Ezek", Old, Prophesy, &["ezek"]),
    Book::new("Daniel", "Dan", Old, Prophesy, &["dan"]),
    Book::new("Hosea", "Hos", Old, Prophesy, &["hos"]),
    Book::new("Joel", "Joel", Old, Prophesy, &["joe"]),
    Book::new("Amos", "Amo", Old, Prophesy, &["am", "amo"]),
    Book::new("Obadiah", "Oba", Old, Prophesy, &["ob", "oba"]),
    Book::new("Jonah", "Jon", Old, Prophesy, &["jon"]),
    Book::new("Micah", "Mic", Old, Prophesy, &["mic"]),
    Book::new("Nahum", "Nah", Old, Prophesy, &["na", "nah"]),
    Book::new("Habakkuk", "Hab", Old, Prophesy, &["hab"]),
    Book::new("Zephaniah", "Zep", Old, Prophesy, &["zep", "zeph", "zef"]),
    Book::new("Haggai", "Hag", Old, Prophesy, &["hag", "hagg"]),
    Book::new("Zechariah", "Zec", Old, Prophesy, &["zec", "zech", "zek"]),
    Book::new("Malachi", "Mal", Old, Prophesy, &["mal"]),
    Book::new("Matthew", "Mat", New, Gospel, &["mat", "matt"]),
    Book::new("Mark", "Mrk", New, Gospel, &["mrk", "mar"]),
    Book::new("Luke", "Luk", New, Gospel, &["lu", "luk"]),
    Book::new("John", "Jhn", New, Gospel, &["joh", "jhn"]),
    Book::new("Acts", "Act", New, History, &["ac", "act"]),
    Book::new("Romans", "Rom", New, Epistle, &["ro", "rom"]),
    Book::new("1 Corinthians", "1Co", New, Epistle, &["1co", "1cor"]),
    Book::new("2 Corinthians", "2Co", New, Epistle, &["2co", "2cor"]),
    Book::new("Galatians", "Gal", New, Epistle, &["gal"]),
    Book::new("Ephesians", "Eph", New, Epistle, &["eph"]),
    Book::new("Philippians", "Php", New, Epistle, &["php"]),
    Book::new("Colossians", "Col", New, Epistle, &["col", "colo"]),
    Book::new("1 Thessalonians", "1Th", New, Epistle, &["1th", "1the", "1thess"]),
    Book::new("2 Thessalonians", "2Th", New, Epistle, &["2th", "2the", "2thess"]),
    Book::new("1 Timothy", "1Ti", New, Epistle, &["1ti", "1tim"]),
    Book::new("2 Timothy", "2Ti", New, Epistle, &["2ti", "2tim"]),
    Book::new("Titus", "Tit", New, Epistle, &["tit"]),
    Book::new("Philemon", "Phm", New, Epistle, &["phm", "philem"]),
    Book::new("Hebrews", "Heb", New, Epistle, &["heb"]),
    Book::new("James", "Jas", New, Epistle, &["jam", "jas", "jame"]),
    Book::new("1 Peter", "1Pe", New, Epistle, &["1pe", "1pet"]),
    Book::new("2 Peter", "2Pe", New, Epistle, &["2pe", "2pet"]),
    Book::new("1 John", "1Jn", New, Epistle, &["1jn", "1jo", "1joh"]),
    Book::new("2 John", "2Jn", New, Epistle, &["2jn", "2jo", "2joh"]),
    Book::new("3 John", "3Jn", New, Epistle, &["3jn", "3jo", "3joh"]),
    Book::new("Jude", "Jud", New, Epistle, &["jud"]),
    Book::new("Revelation", "Rev", New, Prophesy, &["rev", "revel"]),
];

/// Normalize a user-typed keyword: NFKC, lowercase, trimmed.
pub fn normalize_keyword(text: &str) -> String {
    text.nfkc().collect::<String>().trim().to_lowercase()
}

/// Keyword to ordered set of short codes. Read-only once built.
#[derive(Debug, Default, Clone)]
pub struct FilterIndex {
    entries: HashMap<String, Vec<&'static str>>,
}

impl FilterIndex {
    pub fn get(&self, keyword: &str) -> Option<&[&'static str]> {
        self.entries.get(keyword).map(Vec::as_slice)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.entries.contains_key(keyword)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keywords, sorted.
    pub fn keywords(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    fn add(&mut self, keyword: &str, short_code: &'static str) {
        let codes = self.entries.entry(keyword.to_lowercase()).or_default();
        if !codes.contains(&short_code) {
            codes.push(short_code);
        }
    }
}

/// Build the filter index over a catalog. Every book lands under each of its
/// aliases, its testament's aliases, its category's aliases and its
/// lower-cased full name (also without spaces, so "1kings" works), in
/// catalog order.
pub fn build_filter_index(books: &'static [Book]) -> FilterIndex {
    let mut index = FilterIndex::default();
    for book in books {
        for alias in book.aliases {
            index.add(alias, book.short_code);
        }
        for alias in book.testament.aliases() {
            index.add(alias, book.short_code);
        }
        for alias in book.category.aliases() {
            index.add(alias, book.short_code);
        }
        index.add(book.full_name, book.short_code);
        index.add(&compact(book.full_name), book.short_code);
    }
    index
}

/// The book catalog plus the indexes derived from it. Built once at startup
/// and shared by reference.
#[derive(Debug, Clone)]
pub struct Registry {
    books: &'static [Book],
    by_name: HashMap<String, usize>,
    filters: FilterIndex,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::from_catalog(BOOKS)
    }

    pub fn from_catalog(books: &'static [Book]) -> Self {
        let mut by_name = HashMap::new();
        for (ix, book) in books.iter().enumerate() {
            for name in book.names() {
                by_name.insert(compact(&name), ix);
                by_name.insert(name, ix);
            }
            by_name.insert(book.short_code.to_lowercase(), ix);
        }
        let filters = build_filter_index(books);
        tracing::debug!(books = books.len(), keywords = filters.len(), "built book registry");
        Self { books, by_name, filters }
    }

    pub fn books(&self) -> &'static [Book] {
        self.books
    }

    pub fn filter_index(&self) -> &FilterIndex {
        &self.filters
    }

    /// Find a book by full name, alias or short code, ignoring case. Names
    /// typed with inner spaces ("2 tim") are retried without them.
    pub fn lookup(&self, name: &str) -> Result<&Book> {
        let key = normalize_keyword(name);
        self.by_name
            .get(&key)
            .or_else(|| self.by_name.get(&compact(&key)))
            .map(|&ix| &self.books[ix])
            .ok_or_else(|| StudyError::lookup_miss("book", name.trim()))
    }

    pub fn by_short_code(&self, code: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.short_code == code)
    }
}

fn compact(name: &str) -> String {
    name.split_whitespace().collect()
}
