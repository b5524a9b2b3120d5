//! Cursor options.

/// Default read buffer size (8 KiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Default upper bound for a single record (64 MiB).
pub const DEFAULT_MAX_RECORD_LEN: usize = 64 * 1024 * 1024;

/// Options for reading report record streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorOptions {
    /// Size of the buffer refilled from disk.
    pub buffer_capacity: usize,
    /// Largest accepted record, in bytes. Larger frames are rejected
    /// before any allocation happens.
    pub max_record_len: usize,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_record_len: DEFAULT_MAX_RECORD_LEN,
        }
    }
}

impl CursorOptions {
    /// Create cursor options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read buffer size.
    #[must_use]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(1);
        self
    }

    /// Set the largest accepted record size.
    #[must_use]
    pub fn with_max_record_len(mut self, len: usize) -> Self {
        self.max_record_len = len;
        self
    }
}
