//! Line/offset ranges and their clipping to a single line.

use std::fmt;

use srcline_report::TextRange;

use crate::error::{CodecError, OffsetError, Result};

/// An immutable line/offset interval, possibly spanning several lines.
///
/// Lines are 1-indexed. `start_offset` is relative to `start_line` and
/// `end_offset` to `end_line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    start_line: u32,
    end_line: u32,
    start_offset: u32,
    end_offset: u32,
}

impl Range {
    /// Create a range, checking its line bounds.
    ///
    /// Offset order is not checked here: it depends on the line being
    /// clipped and is reported by [`clip`].
    pub fn new(start_line: u32, end_line: u32, start_offset: u32, end_offset: u32) -> Result<Self> {
        if start_line == 0 {
            return Err(CodecError::invalid_range("start line must be at least 1"));
        }
        if end_line < start_line {
            return Err(CodecError::invalid_range(format!(
                "end line {end_line} is before start line {start_line}"
            )));
        }
        Ok(Self {
            start_line,
            end_line,
            start_offset,
            end_offset,
        })
    }

    /// Create a range covering whole lines, as used for duplicated blocks.
    pub fn lines(start_line: u32, end_line: u32) -> Result<Self> {
        Self::new(start_line, end_line, 0, 0)
    }

    #[must_use]
    pub const fn start_line(&self) -> u32 {
        self.start_line
    }

    #[must_use]
    pub const fn end_line(&self) -> u32 {
        self.end_line
    }

    #[must_use]
    pub const fn start_offset(&self) -> u32 {
        self.start_offset
    }

    #[must_use]
    pub const fn end_offset(&self) -> u32 {
        self.end_offset
    }

    /// Number of lines after the first one.
    #[must_use]
    pub const fn line_span(&self) -> u32 {
        self.end_line - self.start_line
    }

    /// Whether `line` lies within the range.
    #[must_use]
    pub const fn covers(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

impl TryFrom<&TextRange> for Range {
    type Error = CodecError;

    fn try_from(range: &TextRange) -> Result<Self> {
        let field = |name: &str, value: i32| {
            u32::try_from(value)
                .map_err(|_| CodecError::invalid_range(format!("negative {name} {value}")))
        };
        Self::new(
            field("start line", range.start_line)?,
            field("end line", range.end_line)?,
            field("start offset", range.start_offset)?,
            field("end offset", range.end_offset)?,
        )
    }
}

impl TryFrom<TextRange> for Range {
    type Error = CodecError;

    fn try_from(range: TextRange) -> Result<Self> {
        Self::try_from(&range)
    }
}

/// Convert an optional wire range, failing when it is absent.
pub(crate) fn required(range: Option<&TextRange>, what: &str) -> Result<Range> {
    range
        .ok_or_else(|| CodecError::invalid_range(format!("missing {what}")))
        .and_then(Range::try_from)
}

/// Offsets of a range restricted to one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClippedOffsets {
    pub start: u32,
    pub end: u32,
}

impl ClippedOffsets {
    /// True when the range contributes no character on this line.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for ClippedOffsets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.start, self.end)
    }
}

/// Restrict `range` to `line`, a line of `line_length` characters.
///
/// A bound the range does not place on `line` extends to the line
/// boundary: start defaults to 0 and end to `line_length`.
pub fn clip(
    range: &Range,
    line: u32,
    line_length: u32,
) -> std::result::Result<ClippedOffsets, OffsetError> {
    let start_here = range.start_line == line;
    let end_here = range.end_line == line;
    let start = if start_here { range.start_offset } else { 0 };
    let end = if end_here {
        range.end_offset
    } else {
        line_length
    };

    if start_here && end_here && end < start {
        return Err(OffsetError::EndBeforeStart { start, end, line });
    }
    if end > line_length {
        return Err(OffsetError::EndOutOfLine {
            end,
            length: line_length,
            line,
        });
    }
    if start > line_length {
        return Err(OffsetError::StartOutOfLine {
            start,
            length: line_length,
            line,
        });
    }
    Ok(ClippedOffsets { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start_line: u32, end_line: u32, start_offset: u32, end_offset: u32) -> Range {
        Range::new(start_line, end_line, start_offset, end_offset).unwrap()
    }

    #[test]
    fn test_single_line_is_unchanged() {
        let offsets = clip(&range(1, 1, 2, 4), 1, 5).unwrap();
        assert_eq!(offsets, ClippedOffsets { start: 2, end: 4 });
        assert_eq!(offsets.to_string(), "2,4");
    }

    #[test]
    fn test_multi_line_pieces() {
        let r = range(3, 5, 4, 2);
        assert_eq!(clip(&r, 3, 10).unwrap(), ClippedOffsets { start: 4, end: 10 });
        assert_eq!(clip(&r, 4, 7).unwrap(), ClippedOffsets { start: 0, end: 7 });
        assert_eq!(clip(&r, 5, 6).unwrap(), ClippedOffsets { start: 0, end: 2 });
    }

    #[test]
    fn test_empty_middle_line() {
        let offsets = clip(&range(1, 3, 1, 1), 2, 0).unwrap();
        assert_eq!(offsets, ClippedOffsets { start: 0, end: 0 });
        assert!(offsets.is_empty());
    }

    #[test]
    fn test_end_before_start() {
        let err = clip(&range(2, 2, 4, 1), 2, 10).unwrap_err();
        assert_eq!(
            err,
            OffsetError::EndBeforeStart {
                start: 4,
                end: 1,
                line: 2
            }
        );
    }

    #[test]
    fn test_end_outside_line() {
        let err = clip(&range(1, 1, 0, 8), 1, 5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "End offset 8 is defined outside the length (5) of the line 1"
        );
    }

    #[test]
    fn test_start_outside_line_on_first_line_of_block() {
        // The end falls back to the line length, so only the start is wrong.
        let err = clip(&range(1, 2, 9, 0), 1, 5).unwrap_err();
        assert_eq!(
            err,
            OffsetError::StartOutOfLine {
                start: 9,
                length: 5,
                line: 1
            }
        );
    }

    #[test]
    fn test_end_checked_before_start() {
        let err = clip(&range(4, 4, 9, 12), 4, 5).unwrap_err();
        assert!(matches!(err, OffsetError::EndOutOfLine { end: 12, .. }));
    }

    #[test]
    fn test_range_validation() {
        assert!(Range::new(0, 1, 0, 0).is_err());
        assert!(Range::new(3, 2, 0, 0).is_err());
        assert!(Range::try_from(TextRange::new(1, 1, -1, 2)).is_err());

        let r = Range::try_from(TextRange::new(2, 6, 1, 3)).unwrap();
        assert_eq!(r.line_span(), 4);
        assert!(r.covers(2));
        assert!(r.covers(6));
        assert!(!r.covers(7));
        assert!(!r.covers(1));
    }

    #[test]
    fn test_reversed_wire_lines_are_rejected() {
        let err = Range::try_from(TextRange::new(5, 2, 0, 0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid range: end line 2 is before start line 5"
        );
        assert!(required(Some(&TextRange::new(5, 2, 0, 0)), "origin").is_err());
    }

    #[test]
    fn test_required_range() {
        let err = required(None, "declaration").unwrap_err();
        assert_eq!(err.to_string(), "invalid range: missing declaration");
        let r = required(Some(&TextRange::new(1, 2, 0, 0)), "origin").unwrap();
        assert_eq!(r, Range::lines(1, 2).unwrap());
    }
}
