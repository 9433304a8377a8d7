//! Single-pass row pipeline: parse → enrich → validate → route → count.

pub mod enrich;
pub mod sink;
pub mod validate;

use crate::constants::{
    ERROR_FIELD, LINE_NUMBER_FIELD, NOT_NULL_FIELDS, RAW_LINE_FIELD, REQUIRED_SCHEMA_FIELDS,
};
use crate::error::{EtlError, Result, RowError};
use crate::metrics::PipelineMetrics;
use crate::types::{BatchContext, Row, RunCounters};
use chrono::Utc;
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use tracing::{debug, instrument, warn};

use self::sink::RowSink;

/// What happened to a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Accepted,
    Rejected(RowError),
}

/// Routes each input line to exactly one of two sinks.
pub struct RowPipeline<'a, A: RowSink, R: RowSink> {
    context: &'a BatchContext,
    accepted: A,
    rejected: R,
    counters: RunCounters,
    echo: Option<Box<dyn Write + 'a>>,
}

impl<'a, A: RowSink, R: RowSink> RowPipeline<'a, A, R> {
    pub fn new(context: &'a BatchContext, accepted: A, rejected: R) -> Self {
        Self {
            context,
            accepted,
            rejected,
            counters: RunCounters::default(),
            echo: None,
        }
    }

    /// Also write each accepted row to `out` as `[NNNN][OK]: <row>`.
    pub fn with_echo(mut self, out: impl Write + 'a) -> Self {
        self.echo = Some(Box::new(out));
        self
    }

    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    /// Process every line of `reader`. Only I/O errors stop the run.
    pub fn run<B: BufRead>(&mut self, reader: B) -> Result<RunCounters> {
        for chunk in reader.split(b'\n') {
            let bytes = chunk.map_err(EtlError::Read)?;
            match String::from_utf8(bytes) {
                Ok(line) => self.process_line(&line)?,
                Err(e) => {
                    let raw = String::from_utf8_lossy(e.as_bytes()).into_owned();
                    let error = RowError::Decode(format!("line is not valid UTF-8: {e}"));
                    self.reject_line(&raw, error)?
                }
            };
        }
        Ok(self.counters)
    }

    /// Process one raw line and write it to exactly one sink.
    #[instrument(level = "trace", skip(self, line), fields(line_index = self.counters.lines_read))]
    pub fn process_line(&mut self, line: &str) -> Result<RowOutcome> {
        match parse_row(line) {
            Ok(mut row) => {
                enrich::add_metadata(&mut row, self.context, Utc::now());
                match validate_row(&row) {
                    Ok(()) => self.accept_row(row),
                    Err(error) => self.reject_row(row, error),
                }
            }
            Err(error) => self.reject_line(line, error),
        }
    }

    /// Flush both sinks and hand them back with the final counters.
    pub fn finish(mut self) -> Result<(RunCounters, A, R)> {
        self.accepted.flush()?;
        self.rejected.flush()?;
        if let Some(out) = self.echo.as_mut() {
            out.flush().map_err(|source| EtlError::Write { sink: "echo", source })?;
        }
        Ok((self.counters, self.accepted, self.rejected))
    }

    fn accept_row(&mut self, row: Row) -> Result<RowOutcome> {
        let index = self.counters.lines_read;
        self.accepted.write_document(&row)?;
        if let Some(out) = self.echo.as_mut() {
            writeln!(out, "{}", echo_line(index, &row))
                .map_err(|source| EtlError::Write { sink: "echo", source })?;
        }
        debug!(line_index = index, "row accepted");
        self.counters.accepted += 1;
        self.count_line();
        PipelineMetrics::record_accepted();
        Ok(RowOutcome::Accepted)
    }

    fn reject_row(&mut self, mut row: Row, error: RowError) -> Result<RowOutcome> {
        let message = self.error_message(&error);
        row.insert(ERROR_FIELD.to_string(), Value::String(message));
        self.write_rejection(&row, error)
    }

    /// Rejection for a line that never became a row.
    fn reject_line(&mut self, line: &str, error: RowError) -> Result<RowOutcome> {
        let mut record = Row::new();
        record.insert(
            LINE_NUMBER_FIELD.to_string(),
            json!(self.counters.lines_read),
        );
        record.insert(
            ERROR_FIELD.to_string(),
            Value::String(self.error_message(&error)),
        );
        record.insert(
            RAW_LINE_FIELD.to_string(),
            Value::String(line.trim_end_matches(&['\r', '\n'][..]).to_string()),
        );
        self.write_rejection(&record, error)
    }

    fn write_rejection(&mut self, record: &Row, error: RowError) -> Result<RowOutcome> {
        self.rejected.write_document(record)?;
        warn!(
            line_index = self.counters.lines_read,
            reason = error.reason(),
            "{}",
            self.error_message(&error)
        );
        self.counters.rejected += 1;
        self.count_line();
        PipelineMetrics::record_rejected(&error);
        Ok(RowOutcome::Rejected(error))
    }

    fn count_line(&mut self) {
        self.counters.lines_read += 1;
        PipelineMetrics::record_line_read();
    }

    fn error_message(&self, error: &RowError) -> String {
        format!("[{:04}][ERR]: {}", self.counters.lines_read, error)
    }
}

/// Console form of an accepted row, prefixed with its zero-based line index.
pub fn echo_line(index: u64, row: &Row) -> String {
    // a Map<String, Value> always serializes to a String
    let document = serde_json::to_string(row).unwrap_or_default();
    format!("[{index:04}][OK]: {document}")
}

/// Decode one trimmed line into a row. Anything but a JSON object is rejected.
pub fn parse_row(line: &str) -> std::result::Result<Row, RowError> {
    let value: Value =
        serde_json::from_str(line.trim()).map_err(|e| RowError::Decode(e.to_string()))?;
    match value {
        Value::Object(row) => Ok(row),
        other => Err(RowError::Decode(format!(
            "expected a JSON object, found {}",
            json_type_name(&other)
        ))),
    }
}

/// Schema check first, then null check.
pub fn validate_row(row: &Row) -> std::result::Result<(), RowError> {
    validate::schema_check(row, REQUIRED_SCHEMA_FIELDS)?;
    validate::null_check(row, NOT_NULL_FIELDS)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
