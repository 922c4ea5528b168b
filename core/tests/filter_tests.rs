use study_core::taxonomy::BOOKS;
use study_core::{resolve, Registry, Resolution, StudyError};

#[test]
fn every_full_name_is_a_filter_key() {
    let registry = Registry::new();
    let index = registry.filter_index();
    for book in BOOKS {
        let key = book.full_name.to_lowercase();
        let codes = index.get(&key).unwrap_or_else(|| panic!("missing key {key}"));
        assert!(codes.contains(&book.short_code), "{key} lacks {}", book.short_code);
    }
}

#[test]
fn testament_and_category_keys_cover_their_books() {
    let registry = Registry::new();
    let index = registry.filter_index();
    assert_eq!(index.get("ot").unwrap().len(), 39);
    assert_eq!(index.get("nt").unwrap().len(), 27);
    assert_eq!(index.get("oldtestament"), index.get("old"));
    assert!(index.get("prophetic").unwrap().contains(&"Rev"));
    assert!(index.get("nt").unwrap().contains(&"Mat"));
    assert!(index.get("gospel").unwrap().contains(&"Mat"));
}

#[test]
fn gospels_resolve_in_catalog_order() {
    let registry = Registry::new();
    let res = resolve(&["gospel"], registry.filter_index());
    assert_eq!(res, Resolution::Books(vec!["Mat", "Mrk", "Luk", "Jhn"]));
}

#[test]
fn new_testament_history_is_acts() {
    let registry = Registry::new();
    let res = resolve(&["new", "history"], registry.filter_index());
    assert_eq!(res, Resolution::Books(vec!["Act"]));
}

#[test]
fn unknown_keyword_is_distinct_from_empty_intersection() {
    let registry = Registry::new();
    let index = registry.filter_index();

    let none = resolve(&["nonexistentword"], index);
    assert_eq!(none, Resolution::NoMatch);
    assert!(matches!(none.into_books(), Err(StudyError::FilterIndexEmpty)));

    let empty = resolve(&["gospel", "law"], index);
    assert_eq!(empty, Resolution::Books(vec![]));
    assert_eq!(empty.into_books().unwrap(), Vec::<&str>::new());
}

#[test]
fn keywords_are_matched_case_insensitively() {
    let registry = Registry::new();
    let res = resolve(&["NT", "Epistles", "1TIM"], registry.filter_index());
    assert_eq!(res, Resolution::Books(vec!["1Ti"]));
}

#[test]
fn numbered_books_resolve_without_spaces() {
    let registry = Registry::new();
    let res = resolve(&["1kings"], registry.filter_index());
    assert_eq!(res, Resolution::Books(vec!["1Ki"]));
}
