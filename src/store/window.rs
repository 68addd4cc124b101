//! Date window
//!
//! The optional `(before, after)` filter applied to bulk queries.

use chrono::NaiveDate;

/// Optional date bounds for bulk queries
///
/// With both bounds set, a date passes when it is before `before` **or**
/// after `after`. That is the union of the two half-lines: only when
/// `after > before` is the core range `[before, after]` excluded. With
/// `after < before` the half-lines overlap and every date passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub before: Option<NaiveDate>,
    pub after: Option<NaiveDate>,
}

impl DateWindow {
    /// Window that accepts every date
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(before: Option<NaiveDate>, after: Option<NaiveDate>) -> Self {
        Self { before, after }
    }

    /// Dates strictly earlier than `date`
    pub fn before(date: NaiveDate) -> Self {
        Self::new(Some(date), None)
    }

    /// Dates strictly later than `date`
    pub fn after(date: NaiveDate) -> Self {
        Self::new(None, Some(date))
    }

    /// Both bounds set (union semantics, see type docs)
    pub fn outside(before: NaiveDate, after: NaiveDate) -> Self {
        Self::new(Some(before), Some(after))
    }

    /// True when no bound is set
    pub fn is_unbounded(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let before = self.before.is_some_and(|b| date < b);
        let after = self.after.is_some_and(|a| date > a);
        before || after
    }
}
