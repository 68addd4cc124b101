//! # simlog
//!
//! A flat-file log of dated, optionally marked text entries with:
//! - A fixed-header binary record format
//! - Newest-first ordering kept by the insertion algorithm
//! - Merge of same-day, same-mark entries
//! - Windowed filtering and regex search
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CLI (simlog binary)                       │
//! │          (argument parsing, editor, printing)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Engine                                │
//! │            (merge / prepend / insert decision)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌──────────────┐          ┌─────────────┐
//!               │   LogStore   │ ───────▶ │    Entry    │
//!               │ (flat file)  │          │   (codec)   │
//!               └──────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod entry;
pub mod store;
pub mod format;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LogError, Result};
pub use config::Config;
pub use entry::Entry;
pub use store::{DateWindow, LogStore};
pub use engine::{AddOutcome, Engine};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of simlog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
