//! Error types for report record streams.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing report record streams.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Report file not found.
    #[error("report file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record or its length delimiter could not be decoded.
    #[error("failed to decode report record: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The stream ended inside a record.
    #[error("report stream truncated inside record {index}")]
    Truncated { index: usize },

    /// A record is larger than the configured limit.
    #[error("report record {index} is {len} bytes, exceeding the limit of {limit} bytes")]
    RecordTooLarge {
        index: usize,
        len: usize,
        limit: usize,
    },

    /// `next_record` was called with no records left.
    #[error("no more records to read")]
    Exhausted,
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Whether this error signals a read past the end of a cursor.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}
