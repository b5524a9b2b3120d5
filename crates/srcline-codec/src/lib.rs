//! Streaming per-line encoding of source file annotations.
//!
//! Each annotation category of an analysis report (syntax highlighting,
//! symbols, duplications, line coverage, SCM blame) has a [`LineReader`]
//! that consumes its sorted record stream in one forward pass, in
//! lock-step with the lines of the source file. For each line the caller
//! hands every reader the line number, the line length and a
//! [`SourceLine`]; each reader fills its own fields.
//!
//! Ranges spanning several lines are clipped to the line being encoded
//! with [`clip`].
//!
//! # Example
//!
//! ```
//! use srcline_codec::{HighlightingLineReader, LineReader, SourceLine, SymbolsLineReader};
//! use srcline_report::{HighlightingType, MemoryCursor, Symbol, SyntaxHighlightingRule, TextRange};
//!
//! let source = ["fn main() {", "}"];
//!
//! let mut readers: Vec<Box<dyn LineReader>> = vec![
//!     Box::new(HighlightingLineReader::new(MemoryCursor::new(vec![
//!         SyntaxHighlightingRule::new(TextRange::new(1, 1, 0, 2), HighlightingType::Keyword),
//!     ]))),
//!     Box::new(SymbolsLineReader::new(MemoryCursor::new(vec![
//!         Symbol::new(TextRange::new(1, 1, 3, 7)),
//!     ]))?),
//! ];
//!
//! let mut lines = Vec::new();
//! for (idx, text) in source.iter().enumerate() {
//!     let line = idx as u32 + 1;
//!     let mut out = SourceLine::new(line);
//!     for reader in &mut readers {
//!         reader.read(line, text.chars().count() as u32, &mut out)?;
//!     }
//!     lines.push(out);
//! }
//!
//! assert_eq!(lines[0].highlighting.as_deref(), Some("0,2,k"));
//! assert_eq!(lines[0].symbols.as_deref(), Some("3,7,1"));
//! assert_eq!(lines[1].highlighting, None);
//! # Ok::<(), srcline_codec::CodecError>(())
//! ```

mod error;
mod line;
mod options;
mod range;
mod readers;

pub use error::{CodecError, OffsetError, Result};
pub use line::SourceLine;
pub use options::{InvalidOffsetPolicy, ReaderOptions};
pub use range::{ClippedOffsets, Range, clip};
pub use readers::{
    CoverageLineReader, DuplicationLineReader, HighlightingLineReader, LineReader, ScmLineReader,
    SymbolsLineReader, highlighting_code,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
