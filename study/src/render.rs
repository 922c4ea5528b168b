use esv_client::{Passage, SearchResults};
use study_core::mapping::COPYRIGHT_MARKER;
use study_core::usage::UsageMatches;
use study_core::Book;

pub const PROMPT_HINT: &str =
    "Enter verse reference, strongs# (i.e. g4982 or h3068), (p)roverb, (h)elp or (q)uit.";

pub const USAGE_HINT: &str = "Find other verses that include a strongs number.  Example: g4982 search";

pub fn help_text() -> &'static str {
    "\
Need Help?  You can enter:
  - a verse (like Ps3.3 or James 4:11)
  - (t)ranslate the latest verse requested
  - (s)how text for the latest verse again
  - search rabble - search for the given word 'rabble'
                  - may not return all matches if too many verses
                  - use quotes around phrases to limit search results
  - a strongs number prefixed by 'g' (for greek)   e.g. g2222
  - a strongs number prefixed by 'h' (for hebrew)  e.g. h5555
  - <strongs-num> search epistles    - searches on strongs num
  - (p)roverb prints a random proverb
  - (d)eclaration displays a random line from your declarations file
  - debug on|off toggles diagnostic logging
  - (q)uit or e(x)it

Examples:
  > 2Tim 1.7             (shows text for 2 Tim 1:7)
  > search rabble        (shows verses with the English word rabble)
  > g4982                (shows definition of Strongs Greek 4982)
  > g4982 search gospels (shows verses that use Strongs Greek 4982)
"
}

pub fn search_results(results: &SearchResults) -> String {
    results
        .results
        .iter()
        .map(|hit| format!("{} - {}\n", hit.reference, hit.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Each passage flattened onto one line, with a single copyright marker at
/// the end.
pub fn one_line_passages(passage: &Passage) -> String {
    let mut out: Vec<String> = passage
        .passages
        .iter()
        .map(|p| {
            let flat = p.replace('\n', " ").replace(COPYRIGHT_MARKER, "");
            flat.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .collect();
    if !out.is_empty() {
        out.push(COPYRIGHT_MARKER.to_string());
    }
    out.join("\n")
}

pub fn usage_summary(found: &UsageMatches) -> Option<String> {
    found
        .is_truncated()
        .then(|| format!("Showing only {} of {} verses found.", found.verses.len(), found.total))
}

pub fn book_table<'a, I>(books: I) -> String
where
    I: IntoIterator<Item = &'a Book>,
{
    books
        .into_iter()
        .map(|b| {
            format!(
                "{:<5} {:<16} {:<14} {:<8} {}",
                b.short_code,
                b.full_name,
                b.testament.to_string(),
                b.category.to_string(),
                b.aliases.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
