//! CSV codec for transfer tables
//!
//! Every row, including the header, is written as a plain CSV record. CSV
//! carries no cell types, so reading yields [`Cell::Text`] and
//! [`Cell::Empty`] only; numeric attributes are parsed during row
//! materialization.

use super::{Cell, Table, TableCodec, TransferFormat};
use crate::error::{BookcaseError, Result};
use std::path::Path;

/// Reads and writes `.csv` transfer files
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

impl CsvCodec {
    pub fn new() -> Self {
        Self
    }

    /// Parse CSV from any reader
    pub fn read_from<R: std::io::Read>(&self, reader: R) -> Result<Table> {
        let mut csv_reader = ::csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut table = Table::default();
        for record in csv_reader.records() {
            let record = record?;
            table.push_row(record.iter().map(Cell::from).collect());
        }
        Ok(table)
    }

    /// Write CSV to any writer
    pub fn write_to<W: std::io::Write>(&self, writer: W, table: &Table) -> Result<()> {
        let mut csv_writer = ::csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);

        for row in table.rows() {
            csv_writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl TableCodec for CsvCodec {
    fn format(&self) -> TransferFormat {
        TransferFormat::Csv
    }

    fn read(&self, path: &Path) -> Result<Table> {
        let file = std::fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BookcaseError::FileNotFound(path.display().to_string())
            } else {
                BookcaseError::FileIoError(format!("Failed to open {}: {}", path.display(), e))
            }
        })?;
        let table = self.read_from(file)?;
        tracing::debug!(path = %path.display(), rows = table.len(), "read transfer file");
        Ok(table)
    }

    fn write(&self, path: &Path, table: &Table) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| {
            BookcaseError::FileIoError(format!("Failed to create {}: {}", path.display(), e))
        })?;
        self.write_to(file, table)?;
        tracing::debug!(path = %path.display(), rows = table.len(), "wrote transfer file");
        Ok(())
    }
}
