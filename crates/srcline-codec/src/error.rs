//! Error types for line decoding.

use srcline_report::ReportError;
use thiserror::Error;

/// A range whose offsets cannot be clipped to the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OffsetError {
    /// Start and end lie on the current line and end precedes start.
    #[error("End offset {end} cannot be defined before start offset {start} on line {line}")]
    EndBeforeStart { start: u32, end: u32, line: u32 },

    /// End offset beyond the line length.
    #[error("End offset {end} is defined outside the length ({length}) of the line {line}")]
    EndOutOfLine { end: u32, length: u32, line: u32 },

    /// Start offset beyond the line length.
    #[error("Start offset {start} is defined outside the length ({length}) of the line {line}")]
    StartOutOfLine { start: u32, length: u32, line: u32 },
}

impl OffsetError {
    /// Line on which the inconsistency was detected.
    #[must_use]
    pub const fn line(&self) -> u32 {
        match self {
            Self::EndBeforeStart { line, .. }
            | Self::EndOutOfLine { line, .. }
            | Self::StartOutOfLine { line, .. } => *line,
        }
    }
}

/// Errors raised while decoding report data into source lines.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Offsets inconsistent with the line they are clipped to.
    #[error(transparent)]
    InvalidOffset(#[from] OffsetError),

    /// A changeset carrying none of author, date or revision.
    #[error("A changeset must contain at least one of: author, revision or date")]
    EmptyChangeset { line: u32 },

    /// No changeset is attributed to the line.
    #[error("no changeset found for line {line}")]
    MissingChangeset { line: u32 },

    /// A report range that cannot describe a source region.
    #[error("invalid range: {message}")]
    InvalidRange { message: String },

    /// Highlighting type absent or outside the known classification.
    #[error("unknown highlighting type {value} starting on line {line}")]
    UnknownHighlightingType { value: i32, line: u32 },

    /// Failure of the underlying report stream.
    #[error("report stream error: {0}")]
    Report(#[from] ReportError),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create an InvalidRange error.
    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self::InvalidRange {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_error_messages() {
        let err = OffsetError::EndBeforeStart {
            start: 4,
            end: 2,
            line: 1,
        };
        assert_eq!(
            err.to_string(),
            "End offset 2 cannot be defined before start offset 4 on line 1"
        );

        let err = OffsetError::EndOutOfLine {
            end: 10,
            length: 5,
            line: 3,
        };
        assert_eq!(
            err.to_string(),
            "End offset 10 is defined outside the length (5) of the line 3"
        );

        let err = OffsetError::StartOutOfLine {
            start: 7,
            length: 5,
            line: 2,
        };
        assert_eq!(
            err.to_string(),
            "Start offset 7 is defined outside the length (5) of the line 2"
        );
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_codec_error_is_transparent_for_offsets() {
        let err: CodecError = OffsetError::EndOutOfLine {
            end: 9,
            length: 8,
            line: 12,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "End offset 9 is defined outside the length (8) of the line 12"
        );
    }

    #[test]
    fn test_changeset_error_message() {
        let err = CodecError::EmptyChangeset { line: 3 };
        assert_eq!(
            err.to_string(),
            "A changeset must contain at least one of: author, revision or date"
        );
    }

    #[test]
    fn test_report_error_conversion() {
        let err: CodecError = ReportError::Exhausted.into();
        assert!(matches!(err, CodecError::Report(ReportError::Exhausted)));
    }
}
