//! Text presentation
//!
//! Human-readable rendering of entries and parsing of user-supplied dates.

use chrono::NaiveDate;

use crate::entry::Entry;

/// Accepted input formats for dates, tried in order
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y %m %d", "%Y-%b-%d", "%Y %b %d"];

/// Which banners to leave out when rendering an entry
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    pub no_date: bool,
    pub no_mark: bool,
    pub no_end: bool,
}

impl FormatOptions {
    /// Contents only, no banners
    pub fn silent() -> Self {
        Self {
            no_date: true,
            no_mark: true,
            no_end: true,
        }
    }
}

/// Render an entry for printing
///
/// ```text
/// -- 2024 Jan 01, Monday --
/// -- Marked: work --
/// contents
/// -- end --
/// ```
pub fn format_entry(entry: &Entry, opts: FormatOptions) -> String {
    let mut res = String::new();
    if !opts.no_date {
        res.push_str(&format!("-- {} --\n", entry.date.format("%Y %b %d, %A")));
    }
    if !opts.no_mark {
        if entry.is_marked() {
            res.push_str(&format!("-- Marked: {} --\n", entry.mark));
        } else {
            res.push_str("-- Not marked --\n");
        }
    }
    res.push_str(entry.contents.trim());
    if !opts.no_end {
        res.push_str("\n-- end --\n");
    }
    res
}

/// Short form used in "no entries" messages, e.g. `2024 Jan 01`
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%Y %b %d").to_string()
}

/// Parse a date in any of the accepted formats
///
/// `YYYY-MM-DD`, `YYYY MM DD`, `YYYY-Mon-DD`, `YYYY Mon DD`
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}
