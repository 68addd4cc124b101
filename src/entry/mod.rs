//! Entry Module
//!
//! One dated, optionally marked unit of text and its on-disk encoding.
//!
//! ## Responsibilities
//! - Identity by (date, mark), ordering by date alone
//! - Merging the bodies of two entries with the same identity
//! - Fixed-header binary encoding and decoding
//!
//! ## Record Format
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │ Header (28 bytes, little-endian)                                     │
//! │ ┌──────────┬───────────┬─────────┬───────────────┬─────────────────┐ │
//! │ │ Year (4) │ Month (4) │ Day (4) │ ContentLen (8)│   MarkLen (8)   │ │
//! │ └──────────┴───────────┴─────────┴───────────────┴─────────────────┘ │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │ Payload                                                              │
//! │ ┌──────────────────────────┬───────────────────────────────────────┐ │
//! │ │ Mark (MarkLen, UTF-8)    │ Contents (ContentLen, UTF-8)          │ │
//! │ └──────────────────────────┴───────────────────────────────────────┘ │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are concatenated with no separators. There is no file header,
//! footer, checksum or version tag; a short header read marks the end.

mod codec;
mod record;

pub use codec::{EntryHeader, HEADER_SIZE};
pub use record::Entry;
