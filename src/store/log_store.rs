//! Log Store
//!
//! Owns the path of one log file and performs every read and rewrite of it.
//!
//! ## Resource model
//! Each call opens the file, does its work and closes it again; no handle is
//! held between calls. Mutations read the entries they need, transform them
//! in memory and rewrite the whole file. Only `prepend` writes in place.
//! Concurrent callers on the same file are not supported.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::entry::Entry;
use crate::error::Result;

use super::{DateWindow, EntryReader};

/// A single flat log file of concatenated entry records
#[derive(Debug, Clone)]
pub struct LogStore {
    /// Path of the log file
    path: PathBuf,
}

impl LogStore {
    /// Create a store for the log file at `path`
    ///
    /// Nothing is touched on disk until an operation runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty log file if none exists
    pub fn ensure_exists(&self) -> Result<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(())
    }

    /// Whether the log holds no bytes at all
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.path.metadata()?.len() == 0)
    }

    // =========================================================================
    // Writing
    // =========================================================================

    /// Place the entry at the head of the log
    ///
    /// Callers must only prepend an entry at least as new as the current head.
    pub fn prepend(&self, entry: &Entry) -> Result<()> {
        // Encode before touching the file so a bad entry leaves it intact
        let record = entry.encode()?;

        let mut file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        let mut old = Vec::new();
        file.read_to_end(&mut old)?;

        file.seek(SeekFrom::Start(0))?;
        file.write_all(&record)?;
        file.write_all(&old)?;
        file.sync_all()?;

        debug!(
            path = %self.path.display(),
            date = %entry.date,
            bytes = record.len() + old.len(),
            "prepended entry"
        );
        Ok(())
    }

    /// Insert the entry after the leading run of strictly newer entries
    ///
    /// Entries with the same date as `entry` end up after it.
    pub fn insert_by_date(&self, entry: &Entry) -> Result<()> {
        let (newer, rest) = self.span(|e| e.is_newer_than(entry))?;
        debug!(newer = newer.len(), rest = rest.len(), date = %entry.date, "inserting entry by date");

        self.rewrite(newer.iter().chain(std::iter::once(entry)).chain(rest.iter()))?;
        Ok(())
    }

    /// Replace the first entry matching `new_entry` by (date, mark)
    ///
    /// Returns whether an entry was replaced. With no match the file is not
    /// written at all, so stray trailing bytes survive.
    pub fn replace(&self, new_entry: &Entry) -> Result<bool> {
        let entries = self.all_entries(DateWindow::all())?;
        let Some(target) = entries.iter().position(|old| new_entry.matches(old)) else {
            return Ok(false);
        };

        self.rewrite(entries.iter().enumerate().map(|(i, old)| {
            if i == target {
                new_entry
            } else {
                old
            }
        }))?;

        Ok(true)
    }

    // =========================================================================
    // Removing
    // =========================================================================

    /// Remove every entry with the given date and mark
    ///
    /// Returns the number of entries removed
    pub fn remove(&self, date: NaiveDate, mark: &str) -> Result<usize> {
        self.remove_where(|e| e.is(date, mark), DateWindow::all())
    }

    /// Remove every entry inside `window` for which `predicate` holds
    ///
    /// Returns the number of entries removed. The file is left untouched
    /// when nothing matches.
    pub fn remove_where<P>(&self, mut predicate: P, window: DateWindow) -> Result<usize>
    where
        P: FnMut(&Entry) -> bool,
    {
        let entries = self.all_entries(DateWindow::all())?;
        let before = entries.len();

        let kept: Vec<&Entry> = entries
            .iter()
            .filter(|e| !(predicate(*e) && window.contains(e.date)))
            .collect();
        let removed = before - kept.len();
        if removed == 0 {
            return Ok(0);
        }

        self.rewrite(kept)?;
        debug!(removed, remaining = before - removed, "removed entries");
        Ok(removed)
    }

    // =========================================================================
    // Bulk Queries
    // =========================================================================

    /// Stream every record from the head of the log
    pub fn entries(&self) -> Result<EntryReader<BufReader<File>>> {
        EntryReader::open(&self.path)
    }

    /// Every entry inside `window` for which `predicate` holds, head first
    ///
    /// A corrupted record aborts the scan with its decode error.
    pub fn filter<P>(&self, mut predicate: P, window: DateWindow) -> Result<Vec<Entry>>
    where
        P: FnMut(&Entry) -> bool,
    {
        let mut res = Vec::new();
        for entry in self.entries()? {
            let entry = entry?;
            if predicate(&entry) && window.contains(entry.date) {
                res.push(entry);
            }
        }
        Ok(res)
    }

    /// Every entry inside `window`
    pub fn all_entries(&self, window: DateWindow) -> Result<Vec<Entry>> {
        self.filter(|_| true, window)
    }

    /// Every entry with the given date and mark inside `window`
    pub fn matching_entries(
        &self,
        date: NaiveDate,
        mark: &str,
        window: DateWindow,
    ) -> Result<Vec<Entry>> {
        self.filter(|e| e.is(date, mark), window)
    }

    /// Split the log at the first entry for which `predicate` fails
    ///
    /// The first list holds the leading run where `predicate` held, the
    /// second list everything from the first failure onwards.
    pub fn span<P>(&self, mut predicate: P) -> Result<(Vec<Entry>, Vec<Entry>)>
    where
        P: FnMut(&Entry) -> bool,
    {
        let mut leading = self.all_entries(DateWindow::all())?;
        let split = leading
            .iter()
            .position(|e| !predicate(e))
            .unwrap_or(leading.len());
        let rest = leading.split_off(split);
        Ok((leading, rest))
    }

    /// Entries inside `window` whose contents match `regex`
    ///
    /// An entry matches if the regex is found in its lines joined by single
    /// spaces, or in any one of its lines.
    pub fn grep(&self, regex: &Regex, window: DateWindow) -> Result<Vec<Entry>> {
        self.filter(|e| grep_matches(regex, e), window)
    }

    /// `grep` restricted to entries with the given mark
    pub fn grep_marked(&self, regex: &Regex, mark: &str, window: DateWindow) -> Result<Vec<Entry>> {
        Ok(self
            .grep(regex, window)?
            .into_iter()
            .filter(|e| e.mark == mark)
            .collect())
    }

    // =========================================================================
    // Single-Entry Queries
    // =========================================================================

    /// The first entry, head first, for which `predicate` holds
    ///
    /// Stops reading as soon as it is found.
    pub fn find_first<P>(&self, mut predicate: P) -> Result<Option<Entry>>
    where
        P: FnMut(&Entry) -> bool,
    {
        for entry in self.entries()? {
            let entry = entry?;
            if predicate(&entry) {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }

    /// The entry with the given date and mark, if any
    pub fn find_specific(&self, date: NaiveDate, mark: &str) -> Result<Option<Entry>> {
        self.find_first(|e| e.is(date, mark))
    }

    /// The head record, `None` if the log is empty
    pub fn last_entry(&self) -> Result<Option<Entry>> {
        self.entries()?.next().transpose()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Truncate the file and write `entries` in order
    ///
    /// Everything is encoded before the file is opened for writing.
    fn rewrite<'a, I>(&self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut buf = Vec::new();
        let mut count = 0;
        for entry in entries {
            entry.write_to(&mut buf)?;
            count += 1;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&self.path)?;
        file.write_all(&buf)?;
        file.sync_all()?;

        debug!(path = %self.path.display(), entries = count, bytes = buf.len(), "rewrote log");
        Ok(count)
    }
}

/// Whether the regex is found in the joined lines or in any single line
fn grep_matches(regex: &Regex, entry: &Entry) -> bool {
    let lines: Vec<&str> = split_lines(&entry.contents).collect();
    regex.is_match(&lines.join(" ")) || lines.iter().any(|line| regex.is_match(line))
}

/// Lines of `text`, treating a lone `\r` as a break as well as `\n` and `\r\n`
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}
