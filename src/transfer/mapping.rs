//! Mapping between transfer tables and book records
//!
//! Import works in two steps:
//! 1. [`indexes_for_attributes`] resolves where each known attribute sits
//!    in an arbitrary header. Unknown columns are ignored and missing
//!    attributes are simply absent, so tables with a subset of columns import.
//! 2. [`materialize_row`] turns one data row into a [`NewBook`], filling
//!    absent values with the record defaults. Rows without a title or an
//!    author are skipped with a [`SkipReason`] instead of failing the import.

use super::{Cell, Row};
use crate::storage::models::{BookAttribute, NewBook, DEFAULT_COPIES, UNSET_SHELF, UNSET_YEAR};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical attribute to column position
pub type AttributeIndex = BTreeMap<BookAttribute, usize>;

/// Resolve the column of every known attribute present in `header`
///
/// The first occurrence wins when a name repeats.
pub fn indexes_for_attributes(header: &[Cell]) -> AttributeIndex {
    let mut index = AttributeIndex::new();
    for (position, cell) in header.iter().enumerate() {
        let Some(name) = cell.as_text() else {
            continue;
        };
        if let Ok(attribute) = name.parse::<BookAttribute>() {
            index.entry(attribute).or_insert(position);
        }
    }
    index
}

/// Why a data row was left out of an import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    MissingTitle,
    MissingAuthor,
    InvalidNumber { attribute: BookAttribute, value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingTitle => f.write_str("missing title"),
            SkipReason::MissingAuthor => f.write_str("missing author"),
            SkipReason::InvalidNumber { attribute, value } => {
                write!(f, "'{}' is not a valid {}", value, attribute)
            }
        }
    }
}

/// A data row that was not imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Position in the table (the header is row 0)
    pub row: usize,
    pub reason: SkipReason,
}

/// Outcome of a table import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Number of records inserted
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

fn text(index: &AttributeIndex, row: &Row, attribute: BookAttribute) -> Option<String> {
    let position = *index.get(&attribute)?;
    row.get(position)?.as_text().map(|value| value.into_owned())
}

fn integer(
    index: &AttributeIndex,
    row: &Row,
    attribute: BookAttribute,
) -> Result<Option<i32>, SkipReason> {
    let Some(cell) = index.get(&attribute).and_then(|position| row.get(*position)) else {
        return Ok(None);
    };
    if cell.is_empty() {
        return Ok(None);
    }
    cell.as_integer()
        .and_then(|n| i32::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| SkipReason::InvalidNumber {
            attribute,
            value: cell.to_string(),
        })
}

/// Copies, defaulting to one; fewer than one copy is not a number of copies
fn copies(index: &AttributeIndex, row: &Row) -> Result<i32, SkipReason> {
    let copies = integer(index, row, BookAttribute::Copies)?.unwrap_or(DEFAULT_COPIES);
    if copies < DEFAULT_COPIES {
        return Err(SkipReason::InvalidNumber {
            attribute: BookAttribute::Copies,
            value: copies.to_string(),
        });
    }
    Ok(copies)
}

/// Build a record from one data row
///
/// Cells past the end of a short row count as empty. Text fields come back
/// in canonical (uppercase) form.
pub fn materialize_row(index: &AttributeIndex, row: &Row) -> Result<NewBook, SkipReason> {
    let title = text(index, row, BookAttribute::Title).ok_or(SkipReason::MissingTitle)?;
    let author = text(index, row, BookAttribute::Author).ok_or(SkipReason::MissingAuthor)?;

    let book = NewBook {
        title,
        author,
        translator: text(index, row, BookAttribute::Translator).unwrap_or_default(),
        publisher: text(index, row, BookAttribute::Publisher).unwrap_or_default(),
        publication_year: integer(index, row, BookAttribute::PublicationYear)?
            .unwrap_or(UNSET_YEAR),
        isbn: text(index, row, BookAttribute::Isbn).unwrap_or_default(),
        copies: copies(index, row)?,
        shelf: text(index, row, BookAttribute::Shelf).unwrap_or_else(|| UNSET_SHELF.to_string()),
        genre: text(index, row, BookAttribute::Genre).unwrap_or_default(),
    };
    Ok(book.canonical())
}

/// Materialize every data row, collecting the rows that had to be skipped
///
/// `first_row` is the table position of `rows[0]`, used in [`SkippedRow`].
pub fn materialize_rows(
    index: &AttributeIndex,
    rows: &[Row],
    first_row: usize,
) -> (Vec<NewBook>, Vec<SkippedRow>) {
    let mut books = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for (offset, row) in rows.iter().enumerate() {
        match materialize_row(index, row) {
            Ok(book) => books.push(book),
            Err(reason) => {
                let row = first_row + offset;
                tracing::warn!(row, reason = %reason, "skipping import row");
                skipped.push(SkippedRow { row, reason });
            }
        }
    }

    (books, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Row {
        names.iter().map(|n| Cell::from(*n)).collect()
    }

    #[test]
    fn test_indexes_in_order() {
        let header = header(&[
            "title",
            "author",
            "translator",
            "publisher",
            "publication_year",
            "isbn",
            "copies",
            "shelf",
        ]);
        let index = indexes_for_attributes(&header);

        assert_eq!(index[&BookAttribute::Title], 0);
        assert_eq!(index[&BookAttribute::Author], 1);
        assert_eq!(index[&BookAttribute::Translator], 2);
        assert_eq!(index[&BookAttribute::Publisher], 3);
        assert_eq!(index[&BookAttribute::PublicationYear], 4);
        assert_eq!(index[&BookAttribute::Isbn], 5);
        assert_eq!(index[&BookAttribute::Copies], 6);
        assert_eq!(index[&BookAttribute::Shelf], 7);
        assert!(!index.contains_key(&BookAttribute::Genre));
    }

    #[test]
    fn test_indexes_out_of_order() {
        let header = header(&[
            "author",
            "translator",
            "publication_year",
            "isbn",
            "publisher",
            "copies",
            "shelf",
            "title",
        ]);
        let index = indexes_for_attributes(&header);

        assert_eq!(index[&BookAttribute::Title], 7);
        assert_eq!(index[&BookAttribute::Author], 0);
        assert_eq!(index[&BookAttribute::Translator], 1);
        assert_eq!(index[&BookAttribute::Publisher], 4);
        assert_eq!(index[&BookAttribute::PublicationYear], 2);
        assert_eq!(index[&BookAttribute::Isbn], 3);
        assert_eq!(index[&BookAttribute::Copies], 5);
        assert_eq!(index[&BookAttribute::Shelf], 6);
    }

    #[test]
    fn test_unknown_columns_ignored() {
        let index = indexes_for_attributes(&header(&["notes", "title", "", "author"]));
        assert_eq!(index.len(), 2);
        assert_eq!(index[&BookAttribute::Title], 1);
        assert_eq!(index[&BookAttribute::Author], 3);
    }

    #[test]
    fn test_materialize_defaults() {
        let index = indexes_for_attributes(&header(&["title", "author", "isbn"]));
        let book = materialize_row(
            &index,
            &vec![Cell::from("Emma"), Cell::from("Austen Jane")],
        )
        .unwrap();

        assert_eq!(book.title, "EMMA");
        assert_eq!(book.author, "AUSTEN JANE");
        assert_eq!(book.isbn, "");
        assert_eq!(book.publication_year, UNSET_YEAR);
        assert_eq!(book.shelf, UNSET_SHELF);
        assert_eq!(book.copies, DEFAULT_COPIES);
    }

    #[test]
    fn test_materialize_numbers_from_text() {
        let index = indexes_for_attributes(&header(&["title", "author", "publication_year", "copies"]));
        let book = materialize_row(
            &index,
            &vec![Cell::from("a"), Cell::from("b"), Cell::from("1954"), Cell::Integer(3)],
        )
        .unwrap();
        assert_eq!(book.publication_year, 1954);
        assert_eq!(book.copies, 3);

        let err = materialize_row(
            &index,
            &vec![Cell::from("a"), Cell::from("b"), Cell::from("MCMLIV"), Cell::Empty],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SkipReason::InvalidNumber {
                attribute: BookAttribute::PublicationYear,
                value: "MCMLIV".to_string()
            }
        );
    }

    #[test]
    fn test_copies_below_one_are_skipped() {
        let index = indexes_for_attributes(&header(&["title", "author", "copies"]));
        let rows = vec![
            vec![Cell::from("a"), Cell::from("b"), Cell::from("0")],
            vec![Cell::from("c"), Cell::from("d"), Cell::Integer(-3)],
            vec![Cell::from("e"), Cell::from("f"), Cell::from("1")],
        ];

        let (books, skipped) = materialize_rows(&index, &rows, 1);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].copies, 1);
        assert_eq!(
            skipped,
            vec![
                SkippedRow {
                    row: 1,
                    reason: SkipReason::InvalidNumber {
                        attribute: BookAttribute::Copies,
                        value: "0".to_string()
                    }
                },
                SkippedRow {
                    row: 2,
                    reason: SkipReason::InvalidNumber {
                        attribute: BookAttribute::Copies,
                        value: "-3".to_string()
                    }
                },
            ]
        );
    }

    #[test]
    fn test_rows_without_title_or_author_are_skipped() {
        let index = indexes_for_attributes(&header(&["title", "author"]));
        let rows = vec![
            vec![Cell::from("ok"), Cell::from("fine")],
            vec![Cell::Empty, Cell::from("x")],
            vec![Cell::from("y"), Cell::from("  ")],
        ];

        let (books, skipped) = materialize_rows(&index, &rows, 1);
        assert_eq!(books.len(), 1);
        assert_eq!(
            skipped,
            vec![
                SkippedRow { row: 2, reason: SkipReason::MissingTitle },
                SkippedRow { row: 3, reason: SkipReason::MissingAuthor },
            ]
        );
    }
}
