//! Error types for simlog
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LogError
pub type Result<T> = std::result::Result<T, LogError>;

/// Unified error type for simlog operations
#[derive(Debug, Error)]
pub enum LogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Record Decoding Errors
    // -------------------------------------------------------------------------
    /// Fewer than a full header's worth of bytes remained. During a scan this
    /// is the normal end of the log.
    #[error("Truncated record header: got {actual} bytes")]
    TruncatedHeader { actual: usize },

    /// A complete header announced more payload than the file holds.
    #[error("Truncated record body: expected {expected} bytes, got {actual}")]
    TruncatedBody { expected: u64, actual: u64 },

    #[error("Invalid UTF-8 in entry {field}: {source}")]
    InvalidEncoding {
        field: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i64, month: u32, day: u32 },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    // -------------------------------------------------------------------------
    // Entry Source Errors
    // -------------------------------------------------------------------------
    #[error("Entry file was not created, nothing will be added to the log")]
    NoEntry,

    #[error("Editor error: {0}")]
    Editor(String),
}

impl LogError {
    /// True for the short header read that terminates a scan.
    pub fn is_end_of_log(&self) -> bool {
        matches!(self, LogError::TruncatedHeader { .. })
    }

    /// True when a record was started but could not be decoded.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            LogError::TruncatedBody { .. }
                | LogError::InvalidEncoding { .. }
                | LogError::InvalidDate { .. }
        )
    }
}
