//! Analysis report record streams.
//!
//! An analysis report stores, per source file, one stream per annotation
//! category: syntax highlighting rules, symbols, duplications, line
//! coverage and SCM changesets. Each stream is a sequence of varint
//! length-delimited protobuf messages, already sorted by the category's
//! key.
//!
//! This crate provides:
//!
//! - The record messages ([`TextRange`], [`SyntaxHighlightingRule`],
//!   [`Symbol`], [`Duplication`], [`LineCoverage`], [`Changesets`])
//! - [`RecordCursor`], the forward-only interface line decoders consume
//! - [`ReportCursor`], a lazily opened file cursor, and [`MemoryCursor`]
//! - [`ReportWriter`] for producing streams
//!
//! # Example
//!
//! ```
//! use srcline_report::{
//!     HighlightingType, MemoryCursor, RecordCursor, SyntaxHighlightingRule, TextRange,
//! };
//!
//! let mut cursor = MemoryCursor::new(vec![SyntaxHighlightingRule::new(
//!     TextRange::new(1, 1, 0, 6),
//!     HighlightingType::Keyword,
//! )]);
//! assert!(cursor.has_next().unwrap());
//! let rule = cursor.next_record().unwrap();
//! assert_eq!(rule.range.map(|r| r.end_offset), Some(6));
//! assert!(cursor.next_record().is_err());
//! ```

mod cursor;
mod error;
mod options;
mod records;
mod writer;

pub use cursor::{MemoryCursor, RecordCursor, ReportCursor};
pub use error::{ReportError, Result};
pub use options::{CursorOptions, DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_RECORD_LEN};
pub use records::{
    Changeset, Changesets, Duplicate, Duplication, HighlightingType, LineCoverage, Symbol,
    SyntaxHighlightingRule, TextRange,
};
pub use writer::{ReportWriter, write_report};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
