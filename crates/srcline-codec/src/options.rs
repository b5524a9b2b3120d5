//! Reader options.

/// What a reader does when a range cannot be clipped to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidOffsetPolicy {
    /// Return the error from `read` (default).
    #[default]
    Fail,
    /// Log a warning and stop emitting this category for the rest of the file.
    SkipCategory,
}

/// Options shared by the line readers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Handling of inconsistent offsets (highlighting and symbols).
    pub invalid_offsets: InvalidOffsetPolicy,
}

impl ReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the invalid offset policy.
    #[must_use]
    pub fn with_invalid_offsets(mut self, policy: InvalidOffsetPolicy) -> Self {
        self.invalid_offsets = policy;
        self
    }

    /// Shorthand for [`InvalidOffsetPolicy::SkipCategory`].
    #[must_use]
    pub fn lenient(self) -> Self {
        self.with_invalid_offsets(InvalidOffsetPolicy::SkipCategory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_options() {
        assert_eq!(
            ReaderOptions::default().invalid_offsets,
            InvalidOffsetPolicy::Fail
        );
        assert_eq!(
            ReaderOptions::new().lenient().invalid_offsets,
            InvalidOffsetPolicy::SkipCategory
        );
    }
}
