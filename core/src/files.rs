use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::{Path, PathBuf};

use crate::strongs::Language;
use crate::Result;

pub const TRANSLATION_MAP_FILE: &str = "TTESV.txt";
pub const STRONGS_GREEK_FILE: &str = "strongsgreek.dat";
pub const STRONGS_HEBREW_FILE: &str = "strongshebrew.dat";
pub const DECLARATIONS_FILE: &str = "declarations.txt";
const SETTINGS_FILE: &str = "settings.json";

/// A reference file fetched on first run.
#[derive(Debug, Clone, Copy)]
pub struct DataFile {
    pub name: &'static str,
    pub url: &'static str,
}

pub const DATA_FILES: &[DataFile] = &[
    DataFile {
        name: TRANSLATION_MAP_FILE,
        url: "https://github.com/tyndale/STEPBible-Data/raw/master/TTESV%20-%20Tyndale%20Translation%20tags%20for%20ESV%20-%20TyndaleHouse.com%20STEPBible.org%20CC%20BY-NC.txt",
    },
    DataFile {
        name: STRONGS_GREEK_FILE,
        url: "https://raw.githubusercontent.com/openscriptures/strongs/master/greek/strongsgreek.dat",
    },
    DataFile {
        name: STRONGS_HEBREW_FILE,
        url: "https://raw.githubusercontent.com/openscriptures/strongs/master/hebrew/strongshebrew.dat",
    },
];

/// Locations of everything kept under the data directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub root: PathBuf,
}

impl DataPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn file(&self, name: &str) -> PathBuf { self.root.join(name) }
    pub fn translation_map(&self) -> PathBuf { self.file(TRANSLATION_MAP_FILE) }
    pub fn declarations(&self) -> PathBuf { self.file(DECLARATIONS_FILE) }
    fn settings(&self) -> PathBuf { self.file(SETTINGS_FILE) }

    pub fn strongs_dictionary(&self, language: Language) -> PathBuf {
        match language {
            Language::Greek => self.file(STRONGS_GREEK_FILE),
            Language::Hebrew => self.file(STRONGS_HEBREW_FILE),
        }
    }

    /// Data files not yet present on disk.
    pub fn missing_files(&self) -> Vec<DataFile> {
        DATA_FILES.iter().copied().filter(|f| !self.file(f.name).exists()).collect()
    }
}

/// Tunables read from `settings.json` in the data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: Option<String>,
    /// Verses shown by a Strong's usage search.
    pub max_strongs_verses: usize,
    pub search_page_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self { api_base_url: None, max_strongs_verses: 20, search_page_size: 100 }
    }
}

/// Load settings, falling back to defaults when the file does not exist.
pub fn load_settings(paths: &DataPaths) -> Result<Settings> {
    let path = paths.settings();
    if !path.exists() {
        return Ok(Settings::default());
    }
    let mut f = File::open(path)?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    Ok(serde_json::from_str(&buf)?)
}

/// Lines of a flat file, read lazily.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Lines<BufReader<File>>> {
    let f = File::open(path)?;
    Ok(BufReader::new(f).lines())
}
