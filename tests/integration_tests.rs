//! Integration tests for simlog
//!
//! End-to-end sessions through the engine, checked against the raw file.

use std::fs;

use chrono::NaiveDate;
use regex::Regex;
use simlog::entry::{Entry, HEADER_SIZE};
use simlog::store::EntryReader;
use simlog::{AddOutcome, DateWindow, Engine};
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
fn test_session_keeps_file_newest_first() {
    let temp = TempDir::new().unwrap();
    let engine = Engine::open_path(temp.path()).unwrap();

    let adds = [
        ("hello", date(2024, 1, 1), "", AddOutcome::Prepended),
        ("older", date(2023, 12, 1), "", AddOutcome::Inserted),
        ("newest", date(2024, 6, 1), "", AddOutcome::Prepended),
        ("tagged", date(2024, 1, 1), "trip", AddOutcome::Inserted),
        ("more", date(2024, 1, 1), "trip", AddOutcome::Merged),
    ];
    for (text, day, mark, expected) in adds {
        assert_eq!(engine.add_text(text, day, mark).unwrap(), expected);
    }

    // Decode the raw bytes independently of the store
    let bytes = fs::read(engine.store().path()).unwrap();
    let entries: Vec<Entry> = EntryReader::new(bytes.as_slice())
        .collect::<Result<_, _>>()
        .unwrap();

    let summary: Vec<(NaiveDate, &str, &str)> = entries
        .iter()
        .map(|e| (e.date, e.mark.as_str(), e.contents.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (date(2024, 6, 1), "", "newest"),
            (date(2024, 1, 1), "trip", "tagged\nmore"),
            (date(2024, 1, 1), "", "hello"),
            (date(2023, 12, 1), "", "older"),
        ]
    );

    let expected_len: usize = entries.iter().map(|e| HEADER_SIZE + e.mark.len() + e.contents.len()).sum();
    assert_eq!(bytes.len(), expected_len);
}

#[test]
fn test_session_remove_then_query() {
    let temp = TempDir::new().unwrap();
    let engine = Engine::open_path(temp.path()).unwrap();

    engine.add_text("alpha beta", date(2024, 2, 1), "x").unwrap();
    engine.add_text("gamma", date(2024, 2, 2), "x").unwrap();
    engine.add_text("beta again", date(2024, 2, 3), "").unwrap();

    engine.remove(date(2024, 2, 1), "x").unwrap();

    let regex = Regex::new("beta").unwrap();
    let found = engine.grep(&regex, DateWindow::all()).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].contents, "beta again");

    assert!(engine.view(date(2024, 2, 1), "x").unwrap().is_none());
    assert_eq!(engine.view_marked("x", DateWindow::all()).unwrap().len(), 1);
}
