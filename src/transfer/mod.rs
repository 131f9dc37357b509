//! Tabular transfer format
//!
//! A [`Table`] is an ordered sequence of rows of scalar [`Cell`]s. Row 0 is
//! the header naming attributes (in any order); each following row is one
//! record. The same structure is used for spreadsheet import/export and for
//! dumping/restoring a collection.
//!
//! Spreadsheet files are read and written through a [`TableCodec`]. The
//! crate ships a CSV codec; other formats plug in behind the same trait.

pub mod csv;
pub mod mapping;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

pub use self::csv::CsvCodec;
pub use mapping::{
    indexes_for_attributes, materialize_row, materialize_rows, AttributeIndex, ImportReport,
    SkipReason, SkippedRow,
};

/// A scalar cell value
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Integer(i64),
    Text(String),
}

impl Cell {
    /// True for empty cells and whitespace-only text
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Integer(_) => false,
            Cell::Text(s) => s.trim().is_empty(),
        }
    }

    /// Trimmed textual value, `None` when the cell is empty
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Cell::Empty => None,
            Cell::Integer(n) => Some(Cow::Owned(n.to_string())),
            Cell::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then_some(Cow::Borrowed(trimmed))
            }
        }
    }

    /// Integer value, parsing text cells; `None` when empty or not a number
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Empty => None,
            Cell::Integer(n) => Some(*n),
            Cell::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<&str> for Cell {
    /// Empty strings become [`Cell::Empty`]
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Integer(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// One row of cells
pub type Row = Vec<Cell>;

/// Header row followed by data rows
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Table with only a header row
    pub fn with_header<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: vec![header.into_iter().map(|name| Cell::from(name.into())).collect()],
        }
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Row 0, if present
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Every row after the header
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// All rows including the header
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows including the header
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Spreadsheet file formats known to the transfer file convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferFormat {
    Xlsx,
    Csv,
}

impl TransferFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            TransferFormat::Xlsx => "xlsx",
            TransferFormat::Csv => "csv",
        }
    }
}

/// Reads and writes tables as spreadsheet files
pub trait TableCodec {
    /// Format this codec handles
    fn format(&self) -> TransferFormat;

    /// Read every row of the file
    fn read(&self, path: &Path) -> Result<Table>;

    /// Write every row of the table, replacing the file
    fn write(&self, path: &Path, table: &Table) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_and_integer() {
        assert_eq!(Cell::from("  x ").as_text().as_deref(), Some("x"));
        assert_eq!(Cell::from("   ").as_text(), None);
        assert!(Cell::from("").is_empty());
        assert_eq!(Cell::Integer(12).as_text().as_deref(), Some("12"));
        assert_eq!(Cell::from(" 1999").as_integer(), Some(1999));
        assert_eq!(Cell::from("19x9").as_integer(), None);
    }

    #[test]
    fn test_table_header_and_data() {
        let mut table = Table::with_header(["title", "author"]);
        table.push_row(vec![Cell::from("A"), Cell::from("B")]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.header().map(|h| h.len()), Some(2));
        assert_eq!(table.data_rows().len(), 1);
        assert!(Table::default().data_rows().is_empty());
    }
}
