//! Flat table output for extracted auction records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::TableError;
use crate::models::record::{AuctionRecord, COLUMNS};

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Serialization format of the output table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    #[default]
    Csv,
    Json,
}

impl TableFormat {
    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Json => "json",
        }
    }
}

/// Trait for table writers.
///
/// Implementations must produce a well-formed table (all columns present)
/// even when `records` is empty.
pub trait TableWriter {
    /// Write all records as one table.
    fn write_table(&mut self, records: &[AuctionRecord]) -> Result<()>;
}

/// CSV table writer.
pub struct CsvTableWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvTableWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| TableError::Io(e.into_error()))
    }
}

impl CsvTableWriter<BufWriter<File>> {
    /// Create a CSV writer for a file path.
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TableWriter for CsvTableWriter<W> {
    fn write_table(&mut self, records: &[AuctionRecord]) -> Result<()> {
        self.writer.write_record(COLUMNS)?;
        for record in records {
            self.writer.write_record(record.to_row())?;
        }
        self.writer.flush()?;

        debug!("Wrote CSV table with {} rows", records.len());
        Ok(())
    }
}

/// JSON table writer: `{"columns": [...], "rows": [{column: value, ...}]}`.
pub struct JsonTableWriter<W: Write> {
    inner: W,
    pretty: bool,
}

impl<W: Write> JsonTableWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            pretty: true,
        }
    }

    /// Set pretty printing.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl JsonTableWriter<BufWriter<File>> {
    /// Create a JSON writer for a file path.
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TableWriter for JsonTableWriter<W> {
    fn write_table(&mut self, records: &[AuctionRecord]) -> Result<()> {
        let rows: Vec<Value> = records.iter().map(record_to_json).collect();

        let mut table = Map::new();
        table.insert(
            "columns".to_string(),
            Value::Array(COLUMNS.iter().map(|c| Value::String(c.to_string())).collect()),
        );
        table.insert("rows".to_string(), Value::Array(rows));
        let table = Value::Object(table);

        if self.pretty {
            serde_json::to_writer_pretty(&mut self.inner, &table)?;
        } else {
            serde_json::to_writer(&mut self.inner, &table)?;
        }
        self.inner.write_all(b"\n")?;
        self.inner.flush()?;

        debug!("Wrote JSON table with {} rows", records.len());
        Ok(())
    }
}

/// One record as a JSON object keyed by column name.
pub fn record_to_json(record: &AuctionRecord) -> Value {
    let mut row = Map::new();
    for (column, value) in COLUMNS.iter().zip(record.to_row()) {
        row.insert(column.to_string(), Value::String(value.to_string()));
    }
    Value::Object(row)
}

/// Create a file-backed writer for the given format.
pub fn create_writer(format: TableFormat, path: &Path) -> Result<Box<dyn TableWriter>> {
    Ok(match format {
        TableFormat::Csv => Box::new(CsvTableWriter::create(path)?),
        TableFormat::Json => Box::new(JsonTableWriter::create(path)?),
    })
}
