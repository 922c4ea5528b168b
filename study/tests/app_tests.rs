use esv_client::Passage;
use std::fs;
use std::time::Duration;
use study::{parse_command, App, AppConfig, Command, Flow};
use study_core::files::{STRONGS_GREEK_FILE, TRANSLATION_MAP_FILE};
use tempfile::{tempdir, TempDir};

const MAPPING: &str = "\
$Mat 1:21\t12=<4982>
$Mrk 10:26\t07=<4982>
$Act 2:21\t09=<4982>
$2Ti 1:7\t01=<1063> 02=<2316> 03=<1325> 04=<2254> 06=<4151> 07=<3756> 09=<1167>
";

fn app() -> (TempDir, App) {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(TRANSLATION_MAP_FILE), MAPPING).unwrap();
    fs::write(
        dir.path().join(STRONGS_GREEK_FILE),
        "$$T0004982\n\\4982\\ sozo\nto save\n$$T0004983\n",
    )
    .unwrap();
    fs::write(dir.path().join("declarations.txt"), "\nI am loved.  - 1 John 4:19\n\n").unwrap();
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        declarations: None,
        api_token: None,
        api_base_url: None,
        timeout: Duration::from_secs(1),
    };
    let app = App::new(config).unwrap();
    (dir, app)
}

#[test]
fn prompt_grammar() {
    assert_eq!(parse_command("  "), Command::Empty);
    assert_eq!(parse_command("debug on"), Command::Debug(true));
    assert_eq!(parse_command("DEBUG off"), Command::Debug(false));
    assert_eq!(parse_command("x"), Command::Quit);
    assert_eq!(parse_command("search rabble"), Command::Search("rabble".into()));
    assert_eq!(parse_command("g4982"), Command::Define("g4982".into()));
    assert_eq!(
        parse_command("G4982 search Gospels"),
        Command::Usage("g4982 search gospels".into())
    );
    assert_eq!(parse_command("tr"), Command::Translate);
    assert_eq!(parse_command("s"), Command::Show);
    assert_eq!(parse_command("prov"), Command::Proverb);
    assert_eq!(parse_command("d"), Command::Declaration);
    assert_eq!(parse_command("2Tim 1.7"), Command::Passage("2tim 1.7".into()));
}

#[test]
fn interlinear_text_has_reference_heading() {
    let (_dir, app) = app();
    let passage = Passage {
        canonical: "2 Timothy 1:7".into(),
        passages: vec![
            "2 Timothy 1:7\n\n  [7] for God gave us a spirit not of fear but of power and love and self-control. (ESV)"
                .into(),
        ],
    };
    let text = app.interlinear_text(&passage).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("2 Timothy 1:7"));
    assert!(lines.next().unwrap().ends_with("for G1063"));
}

#[test]
fn empty_passage_is_a_lookup_miss() {
    let (_dir, app) = app();
    let passage = Passage { canonical: "Hezekiah 1:1".into(), passages: vec![] };
    assert!(app.interlinear_text(&passage).unwrap_err().is_lookup_miss());
}

#[test]
fn definitions_come_from_the_dictionary_file() {
    let (_dir, app) = app();
    assert_eq!(app.definition_text("g4982").unwrap(), "\\4982\\ sozo\nto save");
    assert!(app.definition_text("g1").is_err());
    assert!(app.definition_text("h3068").is_err());
}

#[test]
fn usages_apply_book_filters() {
    let (_dir, app) = app();
    let found = app.usages("g4982 search gospels").unwrap();
    assert_eq!(found.verses, vec!["Mat 1:21", "Mrk 10:26"]);

    let everywhere = app.usages("g4982 search").unwrap();
    assert_eq!(everywhere.total, 3);

    let nothing = app.usages("g4982 search gospel law").unwrap();
    assert_eq!(nothing.total, 0);
}

#[test]
fn books_listing_as_table_and_json() {
    let (_dir, app) = app();
    let table = app.books_text(&["gospel".to_string()], false).unwrap();
    assert_eq!(table.lines().count(), 4);
    assert!(table.lines().next().unwrap().starts_with("Mat"));

    let json = app.books_text(&["new".to_string(), "history".to_string()], true).unwrap();
    let books: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(books.as_array().unwrap().len(), 1);
    assert_eq!(books[0]["short_code"], "Act");

    let all = app.books_text(&[], false).unwrap();
    assert_eq!(all.lines().count(), 66);
}

#[test]
fn declaration_is_framed() {
    let (_dir, app) = app();
    let text = app.declaration_text().unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "I am loved.");
    assert_eq!(lines[2], "    - 1 John 4:19");
}

#[tokio::test]
async fn offline_commands_keep_the_session_going() {
    let (_dir, mut app) = app();
    assert_eq!(app.execute(Command::Translate).await.unwrap(), Flow::Continue);
    assert_eq!(app.execute(Command::Empty).await.unwrap(), Flow::Continue);
    assert_eq!(app.execute(Command::Quit).await.unwrap(), Flow::Quit);
    assert!(app.previous().is_none());
}

#[tokio::test]
async fn passage_lookup_without_token_fails() {
    let (_dir, mut app) = app();
    let err = app.execute(Command::Passage("john 3:16".into())).await.unwrap_err();
    assert!(format!("{err:#}").contains("ESV_API_TOKEN"));
}

#[tokio::test]
async fn usage_scan_runs_off_the_runtime_thread() {
    let (dir, mut app) = app();
    // no matches, so no passage request follows the scan
    assert_eq!(app.execute(Command::Usage("g1 search".into())).await.unwrap(), Flow::Continue);

    fs::remove_file(dir.path().join(TRANSLATION_MAP_FILE)).unwrap();
    let err = app.execute(Command::Usage("g4982 search".into())).await.unwrap_err();
    assert!(err.downcast_ref::<study_core::StudyError>().is_some(), "{err:#}");
}
