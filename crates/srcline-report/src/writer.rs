//! Length-delimited record writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use prost::Message;

use crate::error::{ReportError, Result};

/// Writes report records as varint length-delimited protobuf frames.
pub struct ReportWriter<W: Write> {
    writer: BufWriter<W>,
    records_written: usize,
}

impl<W: Write> ReportWriter<W> {
    /// Create a new report writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            records_written: 0,
        }
    }

    /// Append one record.
    pub fn write_record<T: Message>(&mut self, record: &T) -> Result<()> {
        self.writer
            .write_all(&record.encode_length_delimited_to_vec())?;
        self.records_written += 1;
        Ok(())
    }

    /// Append every record of `records`, in order.
    pub fn write_records<'a, T, I>(&mut self, records: I) -> Result<()>
    where
        T: Message + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush buffered frames and return the inner writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| ReportError::Io(e.into_error()))
    }
}

impl ReportWriter<File> {
    /// Create (or truncate) a report file.
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

/// Write `records` to a new report file at `path`.
pub fn write_report<T: Message>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = ReportWriter::create(path)?;
    writer.write_records(records)?;
    writer.finish()?;
    Ok(())
}
