//! Engine Module
//!
//! The top-level log engine that coordinates entry sources and the store.
//!
//! ## Responsibilities
//! - Prepare the log directory and file on startup
//! - Decide how a new entry enters the log (merge, prepend or insert)
//! - Pick up entries composed in the editor scratch file
//! - Expose the query and removal commands over the store

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, info};

use crate::config::Config;
use crate::entry::Entry;
use crate::error::{LogError, Result};
use crate::store::{DateWindow, LogStore};

/// How `Engine::add` placed an entry in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// An entry with the same date and mark existed; contents were appended to it
    Merged,
    /// The entry became the new head of the log
    Prepended,
    /// The entry was inserted after all strictly newer entries
    Inserted,
}

/// The main log engine
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// The log file
    store: LogStore,

    /// Editor scratch file
    entry_path: PathBuf,
}

impl Engine {
    /// Open or create a log with the given config
    ///
    /// On startup:
    /// 1. Create the log directory
    /// 2. Create the log file if it is missing
    /// 3. Remove a scratch file left behind by an earlier session
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.log_dir)?;

        let store = LogStore::new(config.log_path());
        store.ensure_exists()?;

        let entry_path = config.entry_path();
        if entry_path.exists() {
            debug!(path = %entry_path.display(), "removing stale entry file");
            fs::remove_file(&entry_path)?;
        }

        Ok(Self {
            config,
            store,
            entry_path,
        })
    }

    /// Open with a directory (convenience method)
    ///
    /// Uses default config with the specified log directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().log_dir(path).build())
    }

    // =========================================================================
    // Adding
    // =========================================================================

    /// Add an entry to the log
    ///
    /// Steps:
    /// 1. If an entry with the same date and mark exists, merge into it
    /// 2. Else if the log is empty or its head is older, prepend
    /// 3. Else insert after every strictly newer entry
    pub fn add(&self, entry: Entry) -> Result<AddOutcome> {
        if let Some(mut existing) = self.store.find_specific(entry.date, &entry.mark)? {
            existing.merge(&entry);
            self.store.replace(&existing)?;
            info!(date = %entry.date, mark = %entry.mark, "merged entry");
            return Ok(AddOutcome::Merged);
        }

        let outcome = match self.store.last_entry()? {
            Some(head) if !entry.is_newer_than(&head) => {
                self.store.insert_by_date(&entry)?;
                AddOutcome::Inserted
            }
            _ => {
                self.store.prepend(&entry)?;
                AddOutcome::Prepended
            }
        };

        info!(date = %entry.date, mark = %entry.mark, ?outcome, "added entry");
        Ok(outcome)
    }

    /// Add raw text as an entry for the given date and mark
    pub fn add_text(&self, text: impl Into<String>, date: NaiveDate, mark: &str) -> Result<AddOutcome> {
        self.add(Entry::new(date, mark, text))
    }

    /// Add the contents of the editor scratch file, then delete it
    ///
    /// Fails with `NoEntry` if the editor did not create the file.
    pub fn add_from_entry_file(&self, date: NaiveDate, mark: &str) -> Result<AddOutcome> {
        if !self.entry_path.exists() {
            return Err(LogError::NoEntry);
        }

        let text = fs::read_to_string(&self.entry_path)?;
        let outcome = self.add_text(text, date, mark)?;
        fs::remove_file(&self.entry_path)?;

        Ok(outcome)
    }

    // =========================================================================
    // Viewing
    // =========================================================================

    /// The entry with the given date and mark
    pub fn view(&self, date: NaiveDate, mark: &str) -> Result<Option<Entry>> {
        self.store.find_specific(date, mark)
    }

    /// Every entry with the given mark inside the window
    pub fn view_marked(&self, mark: &str, window: DateWindow) -> Result<Vec<Entry>> {
        self.store.filter(|e| e.mark == mark, window)
    }

    /// Every entry inside the window
    pub fn view_all(&self, window: DateWindow) -> Result<Vec<Entry>> {
        self.store.all_entries(window)
    }

    /// Entries inside the window whose contents match `regex`
    pub fn grep(&self, regex: &Regex, window: DateWindow) -> Result<Vec<Entry>> {
        self.store.grep(regex, window)
    }

    /// Entries with the given mark inside the window whose contents match `regex`
    pub fn grep_marked(&self, regex: &Regex, mark: &str, window: DateWindow) -> Result<Vec<Entry>> {
        self.store.grep_marked(regex, mark, window)
    }

    // =========================================================================
    // Removing
    // =========================================================================

    /// Remove the entry with the given date and mark
    pub fn remove(&self, date: NaiveDate, mark: &str) -> Result<usize> {
        let removed = self.store.remove(date, mark)?;
        info!(%date, mark, removed, "removed entry");
        Ok(removed)
    }

    /// Remove every entry with the given mark inside the window
    pub fn remove_marked(&self, mark: &str, window: DateWindow) -> Result<usize> {
        let removed = self.store.remove_where(|e| e.mark == mark, window)?;
        info!(mark, removed, "removed marked entries");
        Ok(removed)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the underlying store
    pub fn store(&self) -> &LogStore {
        &self.store
    }

    /// Get the editor scratch file path
    pub fn entry_path(&self) -> &Path {
        &self.entry_path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
