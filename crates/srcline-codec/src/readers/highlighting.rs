//! Syntax highlighting encoding.
//!
//! Each highlighted span produces one `start,end,code` token per line it
//! touches. Tokens of a line are joined with `;`, ordered by start offset.
//! Adjacent or overlapping spans are never merged.

use srcline_report::{HighlightingType, RecordCursor, SyntaxHighlightingRule};
use tracing::debug;

use super::{Lookahead, LineReader, Pending, encode_tokens, handle_offset_error, line_number};
use crate::error::{CodecError, Result};
use crate::line::SourceLine;
use crate::options::ReaderOptions;
use crate::range::required;

/// Short code stored for each highlighting type.
///
/// `Unset` has no code.
#[must_use]
pub const fn highlighting_code(kind: HighlightingType) -> Option<&'static str> {
    match kind {
        HighlightingType::Annotation => Some("a"),
        HighlightingType::Constant => Some("c"),
        HighlightingType::Comment => Some("cd"),
        HighlightingType::CppDoc => Some("cppd"),
        HighlightingType::StructuredComment => Some("j"),
        HighlightingType::Keyword => Some("k"),
        HighlightingType::HighlightingString => Some("s"),
        HighlightingType::KeywordLight => Some("h"),
        HighlightingType::PreprocessDirective => Some("p"),
        HighlightingType::Unset => None,
    }
}

/// Encodes syntax highlighting rules, line by line.
pub struct HighlightingLineReader<C: RecordCursor<Record = SyntaxHighlightingRule>> {
    rules: Lookahead<C>,
    pending: Pending<&'static str>,
    options: ReaderOptions,
    skipped: bool,
}

impl<C: RecordCursor<Record = SyntaxHighlightingRule>> HighlightingLineReader<C> {
    /// Create a reader over rules sorted by start line.
    pub fn new(rules: C) -> Self {
        Self::with_options(rules, ReaderOptions::default())
    }

    /// Create a reader with options.
    pub fn with_options(rules: C, options: ReaderOptions) -> Self {
        Self {
            rules: Lookahead::new(rules, "highlighting"),
            pending: Pending::new(),
            options,
            skipped: false,
        }
    }

    /// Whether highlighting was abandoned after inconsistent offsets.
    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    fn admit(&mut self, line: u32) -> Result<()> {
        let rules = self.rules.take_line(line, start_line)?;
        for rule in rules {
            let range = required(rule.range.as_ref(), "highlighting range")?;
            let code = HighlightingType::try_from(rule.kind)
                .ok()
                .and_then(highlighting_code)
                .ok_or(CodecError::UnknownHighlightingType {
                    value: rule.kind,
                    line,
                })?;
            self.pending.push(range, code);
        }
        Ok(())
    }

    fn skip_rest_of_file(&mut self) {
        self.skipped = true;
        self.pending.clear();
        self.rules.close();
        debug!("Highlighting disabled for the rest of the file");
    }
}

fn start_line(rule: &SyntaxHighlightingRule) -> Result<u32> {
    let range = rule
        .range
        .as_ref()
        .ok_or_else(|| CodecError::invalid_range("missing highlighting range"))?;
    line_number(range.start_line)
}

impl<C: RecordCursor<Record = SyntaxHighlightingRule>> LineReader for HighlightingLineReader<C> {
    fn read(&mut self, line: u32, line_length: u32, out: &mut SourceLine) -> Result<()> {
        if self.skipped {
            return Ok(());
        }
        self.admit(line)?;

        match self.pending.clip_all(line, line_length) {
            Ok(tokens) => {
                if let Some(encoded) = encode_tokens(&tokens) {
                    out.highlighting = Some(encoded);
                }
            }
            Err(err) => {
                handle_offset_error(self.options.invalid_offsets, "highlighting", err)?;
                self.skip_rest_of_file();
                return Ok(());
            }
        }

        self.pending.evict(line);
        Ok(())
    }
}
