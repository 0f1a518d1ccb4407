//! Record sinks for emitted telemetry
//!
//! [`JsonLinesWriter`] writes one JSON object per line to any writer.
//! [`RecordCounter`] only counts, for runs that check a transcript without
//! producing output.

use serde::Serialize;
use std::io::{BufWriter, Write};

use crate::app::models::Record;
use crate::{Error, Result};

/// Destination for records emitted at section boundaries
pub trait RecordSink {
    /// Write one record
    fn write_record(&mut self, record: &Record) -> Result<()>;

    /// Flush any buffered output
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Newline-delimited JSON writer
pub struct JsonLinesWriter<W: Write> {
    writer: BufWriter<W>,
    flush_each_record: bool,
    records_written: usize,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            flush_each_record: false,
            records_written: 0,
        }
    }

    /// Flush after every record so a live consumer sees each one immediately
    pub fn with_flush_each_record(mut self, flush_each_record: bool) -> Self {
        self.flush_each_record = flush_each_record;
        self
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Serialize any value as one JSON line
    pub fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, value)
            .map_err(|e| Error::serialization("Failed to serialize record", e))?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| Error::io("Failed to write record", e))?;
        Ok(())
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::io("Failed to flush records", e.into_error()))
    }
}

impl<W: Write> RecordSink for JsonLinesWriter<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        self.write_line(record)?;
        self.records_written += 1;
        if self.flush_each_record {
            RecordSink::flush(self)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::io("Failed to flush records", e))
    }
}

/// Sink that discards records and counts them
#[derive(Debug, Default)]
pub struct RecordCounter {
    pub count: usize,
}

impl RecordSink for RecordCounter {
    fn write_record(&mut self, _record: &Record) -> Result<()> {
        self.count += 1;
        Ok(())
    }
}

/// Collects records in memory
impl RecordSink for Vec<Record> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}
