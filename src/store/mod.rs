//! Store Module
//!
//! The flat log file and every operation on it.
//!
//! ## Responsibilities
//! - Stream records front-to-back, stopping at the first short header
//! - Keep the file newest-first through prepend / insert-by-date
//! - Replace, remove and filter by rewriting the whole file
//!
//! ## File Layout
//! ```text
//! ┌──────────────────────────────┐  ← head (newest)
//! │ Record 1                     │
//! ├──────────────────────────────┤
//! │ Record 2                     │
//! ├──────────────────────────────┤
//! │ ...                          │
//! ├──────────────────────────────┤
//! │ Record N                     │  ← oldest
//! └──────────────────────────────┘  ← end of file (short header read)
//! ```
//!
//! Ordering is maintained only by the insertion algorithm. Nothing here ever
//! re-sorts the file.

mod log_store;
mod reader;
mod window;

pub use log_store::LogStore;
pub use reader::EntryReader;
pub use window::DateWindow;
