//! Per-category line readers.
//!
//! Every reader is bound to one file and consumes its report stream in a
//! single forward pass. `read` must be called for lines 1, 2, 3, ... in
//! order, once each.
//!
//! Readers of range-based categories share the same cycle for each line:
//!
//! ```text
//! admit  ─> records starting on the line join the pending buffer
//! emit   ─> pending ranges are clipped to the line and encoded
//! evict  ─> ranges ending on the line leave the pending buffer
//! ```

mod coverage;
mod duplication;
mod highlighting;
mod scm;
mod symbols;

pub use coverage::CoverageLineReader;
pub use duplication::DuplicationLineReader;
pub use highlighting::{HighlightingLineReader, highlighting_code};
pub use scm::ScmLineReader;
pub use symbols::SymbolsLineReader;

use std::fmt::Display;

use srcline_report::RecordCursor;
use tracing::warn;

use crate::error::{CodecError, OffsetError, Result};
use crate::line::SourceLine;
use crate::options::InvalidOffsetPolicy;
use crate::range::{ClippedOffsets, Range, clip};

/// Streaming decoder of one annotation category.
pub trait LineReader {
    /// Write this category's data for `line` into `out`.
    ///
    /// `line_length` is the number of characters of the line.
    fn read(&mut self, line: u32, line_length: u32, out: &mut SourceLine) -> Result<()>;
}

impl<R: LineReader + ?Sized> LineReader for Box<R> {
    fn read(&mut self, line: u32, line_length: u32, out: &mut SourceLine) -> Result<()> {
        (**self).read(line, line_length, out)
    }
}

/// A cursor with one record of lookahead.
pub(crate) struct Lookahead<C: RecordCursor> {
    cursor: C,
    peeked: Option<C::Record>,
    category: &'static str,
}

impl<C: RecordCursor> Lookahead<C> {
    pub(crate) fn new(cursor: C, category: &'static str) -> Self {
        Self {
            cursor,
            peeked: None,
            category,
        }
    }

    /// Take every record whose trigger line is `line`.
    ///
    /// Records triggered before `line` arrived out of order and are dropped.
    pub(crate) fn take_line<F>(&mut self, line: u32, mut trigger: F) -> Result<Vec<C::Record>>
    where
        F: FnMut(&C::Record) -> Result<u32>,
    {
        let mut admitted = Vec::new();
        loop {
            if self.peeked.is_none() {
                if !self.cursor.has_next()? {
                    break;
                }
                self.peeked = Some(self.cursor.next_record()?);
            }
            let Some(record) = self.peeked.as_ref() else {
                break;
            };
            let at = trigger(record)?;
            if at > line {
                break;
            }
            let record = self.peeked.take();
            if at < line {
                warn!(
                    category = self.category,
                    record_line = at,
                    line,
                    "Dropping out-of-order report record"
                );
                continue;
            }
            admitted.extend(record);
        }
        Ok(admitted)
    }

    pub(crate) fn close(&mut self) {
        self.peeked = None;
        self.cursor.close();
    }
}

/// Ranges already sorted by start line, handed out line by line.
pub(crate) struct SortedRanges<P> {
    entries: Vec<(Range, P)>,
    next: usize,
    category: &'static str,
}

impl<P> SortedRanges<P> {
    /// Sort `entries` by start line, keeping the given order on ties.
    pub(crate) fn new(mut entries: Vec<(Range, P)>, category: &'static str) -> Self {
        entries.sort_by_key(|(range, _)| range.start_line());
        Self {
            entries,
            next: 0,
            category,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Move every range starting on `line` into `pending`.
    pub(crate) fn admit(&mut self, line: u32, pending: &mut Pending<P>)
    where
        P: Clone,
    {
        while let Some((range, payload)) = self.entries.get(self.next) {
            if range.start_line() > line {
                break;
            }
            if range.start_line() == line {
                pending.push(*range, payload.clone());
            } else {
                warn!(
                    category = self.category,
                    record_line = range.start_line(),
                    line,
                    "Dropping range starting before the current line"
                );
            }
            self.next += 1;
        }
    }
}

/// Ranges that cover the current line or a later one, in admission order.
pub(crate) struct Pending<P> {
    entries: Vec<(Range, P)>,
}

impl<P> Pending<P> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, range: Range, payload: P) {
        self.entries.push((range, payload));
    }

    /// Payloads of the ranges covering `line`.
    pub(crate) fn covering(&self, line: u32) -> impl Iterator<Item = &P> {
        self.entries
            .iter()
            .filter(move |(range, _)| range.covers(line))
            .map(|(_, payload)| payload)
    }

    /// Clip every range covering `line`, skipping empty pieces.
    ///
    /// The result is ordered by start offset, ties keeping admission order.
    pub(crate) fn clip_all(
        &self,
        line: u32,
        line_length: u32,
    ) -> std::result::Result<Vec<(ClippedOffsets, &P)>, OffsetError> {
        let mut tokens = Vec::new();
        for (range, payload) in &self.entries {
            if !range.covers(line) {
                continue;
            }
            let offsets = clip(range, line, line_length)?;
            if !offsets.is_empty() {
                tokens.push((offsets, payload));
            }
        }
        tokens.sort_by_key(|(offsets, _)| offsets.start);
        Ok(tokens)
    }

    /// Drop the ranges ending on `line` or earlier.
    pub(crate) fn evict(&mut self, line: u32) {
        self.entries.retain(|(range, _)| range.end_line() > line);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Join `start,end,payload` tokens with `;`. `None` when there are none.
pub(crate) fn encode_tokens<D: Display>(tokens: &[(ClippedOffsets, D)]) -> Option<String> {
    if tokens.is_empty() {
        return None;
    }
    let encoded: Vec<String> = tokens
        .iter()
        .map(|(offsets, payload)| format!("{offsets},{payload}"))
        .collect();
    Some(encoded.join(";"))
}

/// Apply the invalid offset policy to a clipping failure.
///
/// Returns `Ok(())` when the category must be skipped from now on.
pub(crate) fn handle_offset_error(
    policy: InvalidOffsetPolicy,
    category: &'static str,
    err: OffsetError,
) -> Result<()> {
    match policy {
        InvalidOffsetPolicy::Fail => Err(CodecError::InvalidOffset(err)),
        InvalidOffsetPolicy::SkipCategory => {
            warn!(
                category,
                line = err.line(),
                error = %err,
                "Inconsistent offsets in report, ignoring the category for the rest of the file"
            );
            Ok(())
        }
    }
}

/// Convert a wire line number.
pub(crate) fn line_number(value: i32) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|line| *line >= 1)
        .ok_or_else(|| CodecError::invalid_range(format!("invalid line number {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use srcline_report::MemoryCursor;

    fn range(start_line: u32, end_line: u32, start_offset: u32, end_offset: u32) -> Range {
        Range::new(start_line, end_line, start_offset, end_offset).unwrap()
    }

    #[test]
    fn test_lookahead_takes_matching_lines_only() {
        let mut records = Lookahead::new(MemoryCursor::new(vec![1u32, 1, 3, 4]), "test");
        let trigger = |line: &u32| -> Result<u32> { Ok(*line) };

        assert_eq!(records.take_line(1, trigger).unwrap(), vec![1, 1]);
        assert!(records.take_line(2, trigger).unwrap().is_empty());
        assert_eq!(records.take_line(3, trigger).unwrap(), vec![3]);
        assert_eq!(records.take_line(4, trigger).unwrap(), vec![4]);
        assert!(records.take_line(5, trigger).unwrap().is_empty());
    }

    #[test]
    fn test_lookahead_drops_stale_records() {
        let mut records = Lookahead::new(MemoryCursor::new(vec![2u32, 1, 2]), "test");
        let trigger = |line: &u32| -> Result<u32> { Ok(*line) };

        assert_eq!(records.take_line(2, trigger).unwrap(), vec![2, 2]);
    }

    #[test]
    fn test_sorted_ranges_keep_ties_in_order() {
        let mut sorted = SortedRanges::new(
            vec![
                (range(2, 2, 0, 1), "b"),
                (range(1, 3, 0, 1), "a"),
                (range(2, 4, 0, 1), "c"),
            ],
            "test",
        );
        assert_eq!(sorted.len(), 3);
        let mut pending = Pending::new();

        sorted.admit(1, &mut pending);
        assert_eq!(pending.covering(1).copied().collect::<Vec<_>>(), vec!["a"]);

        sorted.admit(2, &mut pending);
        assert_eq!(
            pending.covering(2).copied().collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );

        pending.evict(2);
        assert_eq!(pending.covering(3).copied().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_clip_all_orders_by_start_and_skips_empty() {
        let mut pending = Pending::new();
        pending.push(range(1, 1, 6, 9), 'x');
        pending.push(range(1, 1, 0, 2), 'y');
        pending.push(range(1, 1, 6, 7), 'z');
        pending.push(range(1, 1, 3, 3), 'e');

        let tokens = pending.clip_all(1, 10).unwrap();
        let payloads: Vec<char> = tokens.iter().map(|(_, p)| **p).collect();
        assert_eq!(payloads, vec!['y', 'x', 'z']);
    }

    #[test]
    fn test_encode_tokens() {
        let tokens = vec![
            (ClippedOffsets { start: 0, end: 3 }, "k"),
            (ClippedOffsets { start: 4, end: 9 }, "s"),
        ];
        assert_eq!(encode_tokens(&tokens).as_deref(), Some("0,3,k;4,9,s"));
        assert_eq!(encode_tokens::<&str>(&[]), None);
    }

    #[test]
    fn test_line_number() {
        assert_eq!(line_number(4).unwrap(), 4);
        assert!(line_number(0).is_err());
        assert!(line_number(-3).is_err());
    }
}
