use std::fs;

use study_core::files::{read_lines, DataPaths, STRONGS_GREEK_FILE, TRANSLATION_MAP_FILE};
use study_core::mapping::{annotate_passage, find_mapping_record};
use study_core::strongs::definition;
use study_core::usage::{find_usages, usage_pattern, UsageQuery};
use study_core::{resolve, Registry, StudyError};
use tempfile::{tempdir, TempDir};

const MAPPING: &str = "\
# Tyndale translation tags
$Gen 1:1\t01=<07225> 03=<01254> 04=<00430> 06=<08064> 09=<00776>
$Deu 6:4\t01=<08085> 03=<03068> 04=<00430>
$Mat 1:21\t01=<5088> 03=<5207> 06=<2564> 08=<3686> 09=<2424> 12=<4982> 14=<2992> 17=<266>
$Mrk 10:26\t07=<4982>
$Act 2:21\t09=<4982>
$Rom 10:9\t02+03=<3670> 09=<4982>
$2Ti 1:7\t01=<1063> 02=<2316> 03=<1325> 04=<2254> 06=<4151> 07=<3756> 09=<1167>
";

fn data_dir() -> (TempDir, DataPaths) {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(TRANSLATION_MAP_FILE), MAPPING).unwrap();
    fs::write(
        dir.path().join(STRONGS_GREEK_FILE),
        "$$T0004981\n\\4981\\ skole\n$$T0004982\n\\4982\\ sozo\nto save, i.e. deliver or protect\n$$T0004983\n",
    )
    .unwrap();
    let paths = DataPaths::new(dir.path());
    (dir, paths)
}

#[test]
fn annotates_a_new_testament_passage() {
    let (_dir, paths) = data_dir();
    let registry = Registry::new();
    let passage = "2 Timothy 1:7\n\n  [7] for God gave us a spirit not of fear but of power and love and self-control. (ESV)";

    let lines = read_lines(paths.translation_map()).unwrap();
    let interlinear = annotate_passage(&registry, "2 Timothy 1:7", passage, lines).unwrap();
    let rendered = interlinear.lines();
    assert_eq!(rendered.len(), 7);
    assert!(rendered[0].ends_with("for G1063"));
    assert!(rendered[6].ends_with("of fear G1167"));
}

#[test]
fn old_testament_uses_hebrew_prefix() {
    let (_dir, paths) = data_dir();
    let registry = Registry::new();
    let passage = "Genesis 1:1\n[1] In the beginning, God created the heavens and the earth. (ESV)";
    let lines = read_lines(paths.translation_map()).unwrap();
    let interlinear = annotate_passage(&registry, "Genesis 1:1", passage, lines).unwrap();
    let labels: Vec<String> = interlinear.segments().iter().map(|s| s.label()).collect();
    assert_eq!(labels, vec!["H07225", "H01254", "H00430", "H08064", "H00776"]);
    assert_eq!(interlinear.segments()[0].english, "In");
    assert_eq!(interlinear.segments()[1].english, "the beginning,");
}

#[test]
fn missing_mapping_record_is_a_lookup_miss() {
    let (_dir, paths) = data_dir();
    let registry = Registry::new();
    let lines = read_lines(paths.translation_map()).unwrap();
    let err = annotate_passage(&registry, "Jude 1:3", "Jude 1:3\n[3] text", lines).unwrap_err();
    assert!(err.is_lookup_miss());

    let lines = read_lines(paths.translation_map()).unwrap();
    assert!(find_mapping_record(lines, "$Gen 1:1").unwrap().starts_with("01=<07225>"));
}

#[test]
fn unknown_book_is_a_lookup_miss() {
    let registry = Registry::new();
    let err = annotate_passage(&registry, "Hezekiah 1:1", "x", Vec::new()).unwrap_err();
    assert!(matches!(err, StudyError::LookupMiss { what: "book", .. }));
}

#[test]
fn usage_search_respects_book_filters() {
    let (_dir, paths) = data_dir();
    let registry = Registry::new();

    let query = UsageQuery::parse("g4982 search gospels").unwrap();
    let books = resolve(&query.filters, registry.filter_index());
    let lines = read_lines(paths.translation_map()).unwrap();
    let found = find_usages(lines, query.strongs, &books, 20).unwrap();
    assert_eq!(found.verses, vec!["Mat 1:21", "Mrk 10:26"]);

    let query = UsageQuery::parse("g4982 search").unwrap();
    let books = resolve(&query.filters, registry.filter_index());
    let lines = read_lines(paths.translation_map()).unwrap();
    let found = find_usages(lines, query.strongs, &books, 20).unwrap();
    assert_eq!(found.total, 4);
}

#[test]
fn usage_search_truncates_to_exactly_the_limit() {
    let registry = Registry::new();
    let records: Vec<std::io::Result<String>> =
        (1..=25).map(|v| Ok(format!("$Act 2:{v}\t01=<4982>"))).collect();
    let books = resolve(&Vec::<String>::new(), registry.filter_index());
    let query = UsageQuery::parse("g4982 search").unwrap();
    let found = find_usages(records, query.strongs, &books, 20).unwrap();
    assert_eq!(found.total, 25);
    assert_eq!(found.verses.len(), 20);
    assert!(found.is_truncated());
    assert_eq!(found.verses.last().map(String::as_str), Some("Act 2:20"));
}

#[test]
fn hebrew_usage_matches_five_digit_numbers() {
    let (_dir, paths) = data_dir();
    let registry = Registry::new();
    let query = UsageQuery::parse("H430 search old testament").unwrap();
    assert_eq!(usage_pattern(query.strongs).unwrap().as_str(), "[<+]00430[+>]");

    let books = resolve(&query.filters, registry.filter_index());
    let lines = read_lines(paths.translation_map()).unwrap();
    let found = find_usages(lines, query.strongs, &books, 20).unwrap();
    assert_eq!(found.verses, vec!["Gen 1:1", "Deu 6:4"]);
}

#[test]
fn shorter_number_does_not_match_inside_a_longer_one() {
    let (_dir, paths) = data_dir();
    let registry = Registry::new();
    let query = UsageQuery::parse("g498 search").unwrap();
    assert_eq!(usage_pattern(query.strongs).unwrap().as_str(), "[<+]0498[+>]");

    let books = resolve(&query.filters, registry.filter_index());
    let lines = read_lines(paths.translation_map()).unwrap();
    let found = find_usages(lines, query.strongs, &books, 20).unwrap();
    assert_eq!(found.total, 0);
}

#[test]
fn contradictory_filters_find_nothing() {
    let (_dir, paths) = data_dir();
    let registry = Registry::new();
    let query = UsageQuery::parse("g4982 search gospels law").unwrap();
    let books = resolve(&query.filters, registry.filter_index());
    let lines = read_lines(paths.translation_map()).unwrap();
    let found = find_usages(lines, query.strongs, &books, 20).unwrap();
    assert_eq!(found.total, 0);
}

#[test]
fn definitions_come_from_the_language_file() {
    let (_dir, paths) = data_dir();
    let lines = definition(&paths, "g4982".parse().unwrap()).unwrap();
    assert_eq!(lines, vec!["\\4982\\ sozo", "to save, i.e. deliver or protect"]);

    let miss = definition(&paths, "g9999".parse().unwrap()).unwrap_err();
    assert!(miss.is_lookup_miss());

    // no hebrew file in this data directory
    let io = definition(&paths, "h430".parse().unwrap()).unwrap_err();
    assert!(matches!(io, StudyError::Io(_)));
}
