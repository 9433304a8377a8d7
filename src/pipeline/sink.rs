use crate::error::{EtlError, Result};
use crate::types::Row;
use std::io::Write;

/// Destination for serialized rows, one document per call.
pub trait RowSink {
    /// Append one document followed by a newline.
    fn write_document(&mut self, document: &Row) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}

/// Writes rows as newline-delimited JSON to any writer.
pub struct NdjsonSink<W: Write> {
    name: &'static str,
    writer: W,
}

impl<W: Write> NdjsonSink<W> {
    /// `name` identifies the sink in error messages ("accepted", "rejected").
    pub fn new(name: &'static str, writer: W) -> Self {
        Self { name, writer }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn io_error(&self, source: std::io::Error) -> EtlError {
        EtlError::Write {
            sink: self.name,
            source,
        }
    }
}

impl<W: Write> RowSink for NdjsonSink<W> {
    fn write_document(&mut self, document: &Row) -> Result<()> {
        // Map<String, Value> only fails to serialize on I/O errors
        serde_json::to_writer(&mut self.writer, document)
            .map_err(|e| self.io_error(e.into()))?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.io_error(e))
    }
}
