//! Tests for Engine
//!
//! These tests verify:
//! - Opening creates the directory and log file, clears a stale entry file
//! - Add chooses merge / prepend / insert correctly
//! - Entry file pickup and cleanup
//! - View / grep / remove pass-throughs honour marks and windows

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use regex::Regex;
use simlog::{AddOutcome, Config, DateWindow, Engine, Entry, LogError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup_engine() -> (TempDir, Engine) {
    let temp_dir = TempDir::new().unwrap();
    let engine = Engine::open_path(&temp_dir.path().join("simlog")).unwrap();
    (temp_dir, engine)
}

fn all(engine: &Engine) -> Vec<Entry> {
    engine.view_all(DateWindow::all()).unwrap()
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_directory_and_log() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("nested").join("simlog");

    let engine = Engine::open_path(&dir).unwrap();

    assert!(dir.is_dir());
    assert!(engine.store().path().exists());
    assert_eq!(engine.store().path(), dir.join("log"));
    assert!(engine.store().is_empty().unwrap());
}

#[test]
fn test_open_with_custom_file_names() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .log_dir(temp_dir.path())
        .log_file_name("journal.bin")
        .entry_file_name("draft.txt")
        .build();

    let engine = Engine::open(config).unwrap();

    assert_eq!(engine.store().path(), temp_dir.path().join("journal.bin"));
    assert_eq!(engine.entry_path(), temp_dir.path().join("draft.txt"));
}

#[test]
fn test_open_removes_stale_entry_file() {
    let temp_dir = TempDir::new().unwrap();
    let dir: PathBuf = temp_dir.path().to_path_buf();
    fs::write(dir.join("entry"), "left over").unwrap();

    let engine = Engine::open_path(&dir).unwrap();

    assert!(!engine.entry_path().exists());
}

#[test]
fn test_reopen_keeps_entries() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().to_path_buf();

    {
        let engine = Engine::open_path(&dir).unwrap();
        engine.add_text("persisted", date(2024, 1, 1), "").unwrap();
    }

    let engine = Engine::open_path(&dir).unwrap();
    let entries = all(&engine);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].contents, "persisted");
}

// =============================================================================
// Add Tests
// =============================================================================

#[test]
fn test_add_to_empty_log_prepends() {
    let (_temp, engine) = setup_engine();

    let outcome = engine.add_text("first", date(2024, 1, 1), "").unwrap();

    assert_eq!(outcome, AddOutcome::Prepended);
    assert_eq!(engine.store().last_entry().unwrap().unwrap().contents, "first");
}

#[test]
fn test_add_newer_prepends_older_inserts() {
    let (_temp, engine) = setup_engine();

    engine.add_text("jan", date(2024, 1, 1), "").unwrap();
    let newer = engine.add_text("mar", date(2024, 3, 1), "").unwrap();
    let older = engine.add_text("feb", date(2024, 2, 1), "").unwrap();

    assert_eq!(newer, AddOutcome::Prepended);
    assert_eq!(older, AddOutcome::Inserted);

    let contents: Vec<String> = all(&engine).into_iter().map(|e| e.contents).collect();
    assert_eq!(contents, vec!["mar", "feb", "jan"]);
}

#[test]
fn test_add_same_date_different_mark_is_inserted_at_head_side() {
    let (_temp, engine) = setup_engine();

    engine.add_text("unmarked", date(2024, 1, 1), "").unwrap();
    let outcome = engine.add_text("marked", date(2024, 1, 1), "work").unwrap();

    assert_eq!(outcome, AddOutcome::Inserted);
    let entries = all(&engine);
    assert_eq!(entries[0].mark, "work");
    assert_eq!(entries[1].mark, "");
}

#[test]
fn test_add_same_identity_merges() {
    let (_temp, engine) = setup_engine();

    engine.add_text("morning\n", date(2024, 1, 1), "work").unwrap();
    engine.add_text("other", date(2023, 1, 1), "").unwrap();
    let outcome = engine.add_text("  evening", date(2024, 1, 1), "work").unwrap();

    assert_eq!(outcome, AddOutcome::Merged);
    let entries = all(&engine);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].contents, "morning\nevening");
    assert_eq!(entries[0].mark, "work");
    assert_eq!(entries[1].contents, "other");
}

// =============================================================================
// Entry File Tests
// =============================================================================

#[test]
fn test_add_from_entry_file() {
    let (_temp, engine) = setup_engine();
    fs::write(engine.entry_path(), "written in the editor\n").unwrap();

    let outcome = engine.add_from_entry_file(date(2024, 2, 2), "notes").unwrap();

    assert_eq!(outcome, AddOutcome::Prepended);
    assert!(!engine.entry_path().exists());
    let entry = engine.view(date(2024, 2, 2), "notes").unwrap().unwrap();
    assert_eq!(entry.contents, "written in the editor\n");
}

#[test]
fn test_add_from_missing_entry_file() {
    let (_temp, engine) = setup_engine();

    let result = engine.add_from_entry_file(date(2024, 2, 2), "");

    assert!(matches!(result, Err(LogError::NoEntry)));
    assert!(engine.store().is_empty().unwrap());
}

// =============================================================================
// View / Grep / Remove Tests
// =============================================================================

fn seeded_engine() -> (TempDir, Engine) {
    let (temp, engine) = setup_engine();
    engine.add_text("planning", date(2024, 1, 10), "work").unwrap();
    engine.add_text("groceries", date(2024, 1, 12), "home").unwrap();
    engine.add_text("retro\nplanning next sprint", date(2024, 1, 20), "work").unwrap();
    engine.add_text("quiet day", date(2024, 1, 15), "").unwrap();
    (temp, engine)
}

#[test]
fn test_view_specific() {
    let (_temp, engine) = seeded_engine();

    assert_eq!(
        engine.view(date(2024, 1, 12), "home").unwrap().unwrap().contents,
        "groceries"
    );
    assert!(engine.view(date(2024, 1, 12), "work").unwrap().is_none());
}

#[test]
fn test_view_marked_with_window() {
    let (_temp, engine) = seeded_engine();

    let work = engine.view_marked("work", DateWindow::all()).unwrap();
    assert_eq!(work.len(), 2);
    assert_eq!(work[0].date, date(2024, 1, 20));

    let early_work = engine
        .view_marked("work", DateWindow::before(date(2024, 1, 15)))
        .unwrap();
    assert_eq!(early_work.len(), 1);
    assert_eq!(early_work[0].contents, "planning");
}

#[test]
fn test_grep_and_grep_marked() {
    let (_temp, engine) = seeded_engine();
    let regex = Regex::new("plan").unwrap();

    let found = engine.grep(&regex, DateWindow::all()).unwrap();
    assert_eq!(found.len(), 2);

    let found = engine
        .grep_marked(&regex, "work", DateWindow::after(date(2024, 1, 15)))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].date, date(2024, 1, 20));

    let found = engine.grep_marked(&regex, "home", DateWindow::all()).unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_remove_and_remove_marked() {
    let (_temp, engine) = seeded_engine();

    assert_eq!(engine.remove(date(2024, 1, 15), "").unwrap(), 1);
    assert_eq!(all(&engine).len(), 3);

    assert_eq!(
        engine
            .remove_marked("work", DateWindow::after(date(2024, 1, 15)))
            .unwrap(),
        1
    );
    let remaining = all(&engine);
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().any(|e| e.contents == "planning"));

    assert_eq!(engine.remove_marked("work", DateWindow::all()).unwrap(), 1);
    assert_eq!(all(&engine).len(), 1);
}
