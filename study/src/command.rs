use lazy_static::lazy_static;
use regex::Regex;
use study_core::usage::UsageQuery;

lazy_static! {
    static ref DEBUG_RE: Regex = Regex::new(r"^debug\s+(on|off)\s*$").expect("valid regex");
    static ref HELP_RE: Regex = Regex::new(r"^(help|h)$").expect("valid regex");
    static ref QUIT_RE: Regex = Regex::new(r"^(exit|x|q|quit)$").expect("valid regex");
    static ref STRONGS_RE: Regex = Regex::new(r"^[gh]\d+$").expect("valid regex");
    static ref TRANSLATE_RE: Regex = Regex::new(r"^(t|tr|tran|trans|translate)$").expect("valid regex");
    static ref SHOW_RE: Regex = Regex::new(r"^(s|show)$").expect("valid regex");
    static ref PROVERB_RE: Regex = Regex::new(r"^(p|prov|proverb|proverbs)$").expect("valid regex");
    static ref DECLARATION_RE: Regex = Regex::new(r"^(d|declaration)$").expect("valid regex");
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Debug(bool),
    Help,
    Quit,
    /// Full-text search of the passage API.
    Search(String),
    /// Show the dictionary entry for a Strong's number.
    Define(String),
    /// `g4982 search gospels`
    Usage(String),
    /// Translate the current passage.
    Translate,
    /// Show the current passage again.
    Show,
    Proverb,
    Declaration,
    /// Anything else is taken as a passage reference.
    Passage(String),
}

/// Classify a prompt line. Input is trimmed and lower-cased first.
pub fn parse_command(line: &str) -> Command {
    let text = line.trim().to_lowercase();
    if text.is_empty() {
        return Command::Empty;
    }
    if let Some(caps) = DEBUG_RE.captures(&text) {
        return Command::Debug(&caps[1] == "on");
    }
    if HELP_RE.is_match(&text) {
        return Command::Help;
    }
    if QUIT_RE.is_match(&text) {
        return Command::Quit;
    }
    if let Some(query) = text.strip_prefix("search ") {
        return Command::Search(query.trim().to_string());
    }
    if STRONGS_RE.is_match(&text) {
        return Command::Define(text);
    }
    if UsageQuery::matches(&text) {
        return Command::Usage(text);
    }
    if TRANSLATE_RE.is_match(&text) {
        return Command::Translate;
    }
    if SHOW_RE.is_match(&text) {
        return Command::Show;
    }
    if PROVERB_RE.is_match(&text) {
        return Command::Proverb;
    }
    if DECLARATION_RE.is_match(&text) {
        return Command::Declaration;
    }
    Command::Passage(text)
}
