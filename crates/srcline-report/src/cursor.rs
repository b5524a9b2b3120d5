//! Forward-only record cursors.
//!
//! A cursor yields the decoded records of one report stream, in stream
//! order. File cursors open their file on first use and read one
//! length-delimited frame at a time.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use prost::Message;
use tracing::{debug, trace};

use crate::error::{ReportError, Result};
use crate::options::CursorOptions;

/// Longest varint encoding of a 64-bit length.
const MAX_DELIMITER_LEN: usize = 10;

/// A forward-only, closeable source of decoded report records.
pub trait RecordCursor {
    /// Record type produced by the cursor.
    type Record;

    /// Whether at least one unread record remains.
    ///
    /// Returns `Ok(false)` once the cursor is closed.
    fn has_next(&mut self) -> Result<bool>;

    /// Decode and return the next record.
    ///
    /// Fails with [`ReportError::Exhausted`] when no record remains.
    fn next_record(&mut self) -> Result<Self::Record>;

    /// Release the underlying resources. Safe to call more than once.
    fn close(&mut self);

    /// Read every remaining record, then close the cursor.
    fn drain(&mut self) -> Result<Vec<Self::Record>> {
        let mut records = Vec::new();
        while self.has_next()? {
            records.push(self.next_record()?);
        }
        self.close();
        Ok(records)
    }
}

impl<C: RecordCursor + ?Sized> RecordCursor for Box<C> {
    type Record = C::Record;

    fn has_next(&mut self) -> Result<bool> {
        (**self).has_next()
    }

    fn next_record(&mut self) -> Result<Self::Record> {
        (**self).next_record()
    }

    fn close(&mut self) {
        (**self).close();
    }
}

enum Source {
    Unopened,
    Open(BufReader<File>),
    Closed,
}

/// Cursor over a file of length-delimited protobuf records.
///
/// The file is opened lazily by the first call to
/// [`has_next`](RecordCursor::has_next) or
/// [`next_record`](RecordCursor::next_record), and closed by
/// [`close`](RecordCursor::close) or on drop.
pub struct ReportCursor<T> {
    path: PathBuf,
    options: CursorOptions,
    source: Source,
    buffered: Option<T>,
    records_read: usize,
    _record: PhantomData<fn() -> T>,
}

impl<T: Message + Default> ReportCursor<T> {
    /// Create a cursor over the report file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, CursorOptions::default())
    }

    /// Create a cursor with options.
    pub fn with_options(path: impl Into<PathBuf>, options: CursorOptions) -> Self {
        Self {
            path: path.into(),
            options,
            source: Source::Unopened,
            buffered: None,
            records_read: 0,
            _record: PhantomData,
        }
    }

    /// Path of the underlying report file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records decoded so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    fn reader(&mut self) -> Result<Option<&mut BufReader<File>>> {
        if matches!(self.source, Source::Unopened) {
            let file = File::open(&self.path).map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ReportError::file_not_found(&self.path)
                } else {
                    ReportError::Io(e)
                }
            })?;
            debug!(path = %self.path.display(), "Opened report stream");
            self.source =
                Source::Open(BufReader::with_capacity(self.options.buffer_capacity, file));
        }
        match &mut self.source {
            Source::Open(reader) => Ok(Some(reader)),
            Source::Unopened | Source::Closed => Ok(None),
        }
    }

    /// Decode the next frame into the lookahead slot, if any remains.
    fn fill(&mut self) -> Result<()> {
        if self.buffered.is_some() {
            return Ok(());
        }
        let index = self.records_read;
        let limit = self.options.max_record_len;
        let Some(reader) = self.reader()? else {
            return Ok(());
        };
        let Some(len) = read_delimiter(reader, index)? else {
            return Ok(());
        };
        if len > limit {
            return Err(ReportError::RecordTooLarge { index, len, limit });
        }
        let mut frame = vec![0u8; len];
        reader.read_exact(&mut frame).map_err(|e| truncated(e, index))?;
        let record = T::decode(frame.as_slice())?;
        trace!(index, len, "Decoded report record");
        self.buffered = Some(record);
        self.records_read += 1;
        Ok(())
    }
}

impl<T: Message + Default> RecordCursor for ReportCursor<T> {
    type Record = T;

    fn has_next(&mut self) -> Result<bool> {
        if matches!(self.source, Source::Closed) {
            return Ok(false);
        }
        self.fill()?;
        Ok(self.buffered.is_some())
    }

    fn next_record(&mut self) -> Result<T> {
        if !self.has_next()? {
            return Err(ReportError::Exhausted);
        }
        self.buffered.take().ok_or(ReportError::Exhausted)
    }

    fn close(&mut self) {
        self.release();
    }
}

impl<T> ReportCursor<T> {
    fn release(&mut self) {
        if matches!(self.source, Source::Open(_)) {
            debug!(
                path = %self.path.display(),
                records = self.records_read,
                "Closed report stream"
            );
        }
        self.source = Source::Closed;
        self.buffered = None;
    }
}

impl<T> Drop for ReportCursor<T> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Read a varint length delimiter.
///
/// Returns `None` on a clean end of stream, i.e. before the first byte.
fn read_delimiter<R: Read>(reader: &mut R, index: usize) -> Result<Option<usize>> {
    let mut header = [0u8; MAX_DELIMITER_LEN];
    for pos in 0..MAX_DELIMITER_LEN {
        let mut byte = [0u8; 1];
        match reader.read_exact(&mut byte) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof && pos == 0 => return Ok(None),
            Err(e) => return Err(truncated(e, index)),
        }
        header[pos] = byte[0];
        if byte[0] & 0x80 == 0 {
            return Ok(Some(prost::decode_length_delimiter(&header[..=pos])?));
        }
    }
    // Let prost report the overlong varint.
    Ok(Some(prost::decode_length_delimiter(&header[..])?))
}

fn truncated(err: std::io::Error, index: usize) -> ReportError {
    if err.kind() == ErrorKind::UnexpectedEof {
        ReportError::Truncated { index }
    } else {
        ReportError::Io(err)
    }
}

/// Cursor over records already held in memory.
#[derive(Debug, Clone)]
pub struct MemoryCursor<T> {
    records: VecDeque<T>,
    closed: bool,
}

impl<T> MemoryCursor<T> {
    /// Create a cursor yielding `records` in order.
    pub fn new(records: impl IntoIterator<Item = T>) -> Self {
        Self {
            records: records.into_iter().collect(),
            closed: false,
        }
    }

    /// Create a cursor with no records.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of records not yet read.
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl<T> RecordCursor for MemoryCursor<T> {
    type Record = T;

    fn has_next(&mut self) -> Result<bool> {
        Ok(!self.closed && !self.records.is_empty())
    }

    fn next_record(&mut self) -> Result<T> {
        if self.closed {
            return Err(ReportError::Exhausted);
        }
        self.records.pop_front().ok_or(ReportError::Exhausted)
    }

    fn close(&mut self) {
        self.closed = true;
        self.records.clear();
    }
}
