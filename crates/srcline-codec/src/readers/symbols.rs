//! Symbol reference encoding.
//!
//! Symbols are numbered by the position of their declaration, not by the
//! order of the report: the first declared symbol of the file gets id 1.
//! Every piece of a declaration or reference that touches a line yields a
//! `start,end,id` token on that line. Tokens sharing a start offset are
//! ordered by symbol id, the declaration before the references.

use std::fmt;

use srcline_report::{RecordCursor, Symbol};
use tracing::debug;

use super::{LineReader, Pending, SortedRanges, encode_tokens, handle_offset_error};
use crate::error::Result;
use crate::line::SourceLine;
use crate::options::ReaderOptions;
use crate::range::{Range, required};

/// One declaration (index 0) or reference of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Segment {
    id: u32,
    index: u32,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Encodes symbol declarations and references, line by line.
pub struct SymbolsLineReader {
    segments: SortedRanges<Segment>,
    pending: Pending<Segment>,
    symbol_count: usize,
    options: ReaderOptions,
    skipped: bool,
}

impl SymbolsLineReader {
    /// Read every symbol of the file from `symbols` and number them.
    pub fn new<C: RecordCursor<Record = Symbol>>(symbols: C) -> Result<Self> {
        Self::with_options(symbols, ReaderOptions::default())
    }

    /// Create a reader with options.
    pub fn with_options<C: RecordCursor<Record = Symbol>>(
        mut symbols: C,
        options: ReaderOptions,
    ) -> Result<Self> {
        let mut decoded = Vec::new();
        for symbol in symbols.drain()? {
            let declaration = required(symbol.declaration.as_ref(), "symbol declaration")?;
            let references = symbol
                .references
                .iter()
                .map(Range::try_from)
                .collect::<Result<Vec<_>>>()?;
            decoded.push((declaration, references));
        }
        decoded.sort_by_key(|(declaration, _)| {
            (declaration.start_line(), declaration.start_offset())
        });

        let symbol_count = decoded.len();
        let mut segments = Vec::new();
        for (idx, (declaration, references)) in decoded.into_iter().enumerate() {
            let id = idx as u32 + 1;
            segments.push((declaration, Segment { id, index: 0 }));
            segments.extend(
                references
                    .into_iter()
                    .zip(1..)
                    .map(|(reference, index)| (reference, Segment { id, index })),
            );
        }
        let segments = SortedRanges::new(segments, "symbols");
        debug!(
            symbols = symbol_count,
            segments = segments.len(),
            "Loaded symbols"
        );

        Ok(Self {
            segments,
            pending: Pending::new(),
            symbol_count,
            options,
            skipped: false,
        })
    }

    /// Number of symbols of the file.
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Whether symbols were abandoned after inconsistent offsets.
    pub fn is_skipped(&self) -> bool {
        self.skipped
    }
}

impl LineReader for SymbolsLineReader {
    fn read(&mut self, line: u32, line_length: u32, out: &mut SourceLine) -> Result<()> {
        if self.skipped {
            return Ok(());
        }
        self.segments.admit(line, &mut self.pending);

        match self.pending.clip_all(line, line_length) {
            Ok(mut tokens) => {
                tokens.sort_by_key(|(offsets, segment)| (offsets.start, **segment));
                if let Some(encoded) = encode_tokens(&tokens) {
                    out.symbols = Some(encoded);
                }
            }
            Err(err) => {
                handle_offset_error(self.options.invalid_offsets, "symbols", err)?;
                self.skipped = true;
                self.pending.clear();
                return Ok(());
            }
        }

        self.pending.evict(line);
        Ok(())
    }
}
