//! Entry definition
//!
//! Defines a single log entry and its identity/ordering rules.

use std::cmp::Ordering;

use chrono::NaiveDate;

/// A single entry in the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Calendar day the entry belongs to
    pub date: NaiveDate,

    /// Free-form tag; empty means unmarked
    pub mark: String,

    /// Text body
    pub contents: String,
}

impl Entry {
    /// Create a new entry
    pub fn new(date: NaiveDate, mark: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            date,
            mark: mark.into(),
            contents: contents.into(),
        }
    }

    /// Whether the entry carries a mark
    pub fn is_marked(&self) -> bool {
        !self.mark.is_empty()
    }

    /// Storage identity: same date and same mark. Contents are ignored.
    pub fn matches(&self, other: &Entry) -> bool {
        self.is(other.date, &other.mark)
    }

    /// Whether this entry has the given (date, mark) identity
    pub fn is(&self, date: NaiveDate, mark: &str) -> bool {
        self.date == date && self.mark == mark
    }

    /// Compare by date alone. Entries from the same day compare equal
    /// regardless of mark or contents.
    pub fn cmp_date(&self, other: &Entry) -> Ordering {
        self.date.cmp(&other.date)
    }

    /// Strictly newer than `other`
    pub fn is_newer_than(&self, other: &Entry) -> bool {
        self.cmp_date(other) == Ordering::Greater
    }

    /// Body produced by merging `other` into this entry:
    /// both bodies trimmed and joined by a single newline.
    pub fn merged_contents(&self, other: &Entry) -> String {
        format!("{}\n{}", self.contents.trim(), other.contents.trim())
    }

    /// Merge `other`'s contents into this entry, keeping this entry's
    /// date and mark. Identity is not checked.
    pub fn merge(&mut self, other: &Entry) {
        self.contents = self.merged_contents(other);
    }
}
