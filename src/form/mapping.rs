//! Conversion between the entry form and stored records
//!
//! To the store: names join as `"LAST FIRST"`, the shelf joins as
//! `"ROW-COLUMN"`, year and copies are parsed (an empty year becomes `-1`).
//! Uppercasing is left to the store boundary ([`NewBook::canonical`]).
//!
//! From the store: names split on the first space, the shelf on the first
//! `-`, and a year of `-1` shows as an empty entry.

use super::BookForm;
use crate::error::ValidationError;
use crate::storage::models::{Book, NewBook, UNSET_SHELF, UNSET_YEAR};

/// `"LAST FIRST"`, or empty when both parts are empty
pub fn join_name(last: &str, first: &str) -> String {
    if last.is_empty() && first.is_empty() {
        String::new()
    } else {
        format!("{} {}", last, first)
    }
}

/// Split a stored name into `(last, first)` on the first space
///
/// A value without a space is all last name. Any further spaces stay in
/// the first name.
pub fn split_name(stored: &str) -> (String, String) {
    match stored.split_once(' ') {
        Some((last, first)) => (last.to_string(), first.to_string()),
        None => (stored.to_string(), String::new()),
    }
}

/// `"ROW-COLUMN"`, or the unset sentinel when both parts are empty
pub fn join_shelf(row: &str, column: &str) -> String {
    if row.is_empty() && column.is_empty() {
        UNSET_SHELF.to_string()
    } else {
        format!("{}-{}", row, column)
    }
}

/// Split a stored shelf into `(row, column)`
pub fn split_shelf(stored: &str) -> (String, String) {
    if stored == UNSET_SHELF {
        return (String::new(), String::new());
    }
    match stored.split_once('-') {
        Some((row, column)) => (row.to_string(), column.to_string()),
        None => (stored.to_string(), String::new()),
    }
}

impl BookForm {
    /// Fill the form from a stored record
    pub fn from_book(book: &Book) -> Self {
        let (author_last, author_first) = split_name(&book.author);
        let (trans_last, trans_first) = split_name(book.translator.trim());
        let (shelf_row, shelf_col) = split_shelf(&book.shelf);

        Self {
            title: book.title.clone(),
            author_last,
            author_first,
            trans_last,
            trans_first,
            publisher: book.publisher.clone(),
            pub_year: book.year().map(|y| y.to_string()).unwrap_or_default(),
            isbn: book.isbn.clone(),
            num_of_copies: book.copies.to_string(),
            shelf_row,
            shelf_col,
        }
    }

    /// Field values in stored layout, not yet uppercased
    ///
    /// Genre is not on the form and comes back empty.
    pub fn to_new_book(&self) -> Result<NewBook, ValidationError> {
        let publication_year = if self.pub_year.is_empty() {
            UNSET_YEAR
        } else {
            self.pub_year
                .parse()
                .map_err(|_| ValidationError::InvalidYear)?
        };
        let copies = self
            .num_of_copies
            .parse()
            .map_err(|_| ValidationError::InvalidCopies)?;

        Ok(NewBook {
            title: self.title.clone(),
            author: join_name(&self.author_last, &self.author_first),
            translator: join_name(&self.trans_last, &self.trans_first),
            publisher: self.publisher.clone(),
            publication_year,
            isbn: self.isbn.clone(),
            copies,
            shelf: join_shelf(&self.shelf_row, &self.shelf_col),
            genre: String::new(),
        })
    }

    /// Whether any form value differs from the stored record
    ///
    /// Compares the eight form fields after bringing the form into canonical
    /// form; genre is not on the form and never counts.
    pub fn changed(&self, book: &Book) -> Result<bool, ValidationError> {
        let fields = self.to_new_book()?.canonical();
        Ok(book.title != fields.title
            || book.author != fields.author
            || book.translator != fields.translator
            || book.publisher != fields.publisher
            || book.publication_year != fields.publication_year
            || book.isbn != fields.isbn
            || book.copies != fields.copies
            || book.shelf != fields.shelf)
    }

    /// Copy the form values into `book`, keeping its id and genre
    ///
    /// The record is only modified in memory; save it through the store.
    pub fn apply_to(&self, book: &mut Book) -> Result<(), ValidationError> {
        let mut fields = self.to_new_book()?;
        fields.genre = std::mem::take(&mut book.genre);
        book.apply(fields);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> BookForm {
        BookForm {
            title: "title".to_string(),
            author_last: "author_last".to_string(),
            author_first: "author_first".to_string(),
            trans_last: "trans_last".to_string(),
            trans_first: "trans_first".to_string(),
            publisher: "publisher".to_string(),
            pub_year: "1111".to_string(),
            isbn: "0123456789".to_string(),
            num_of_copies: "3".to_string(),
            shelf_row: "1".to_string(),
            shelf_col: "2".to_string(),
        }
    }

    fn stored() -> Book {
        Book {
            id: 4,
            title: "TITLE".to_string(),
            author: "AUTHOR_LAST AUTHOR_FIRST".to_string(),
            translator: "TRANS_LAST TRANS_FIRST".to_string(),
            publisher: "PUBLISHER".to_string(),
            publication_year: 1111,
            isbn: "0123456789".to_string(),
            copies: 3,
            shelf: "1-2".to_string(),
            genre: "EPIC".to_string(),
        }
    }

    #[test]
    fn test_to_new_book() {
        let book = filled().to_new_book().unwrap();
        assert_eq!(book.title, "title");
        assert_eq!(book.author, "author_last author_first");
        assert_eq!(book.translator, "trans_last trans_first");
        assert_eq!(book.publisher, "publisher");
        assert_eq!(book.publication_year, 1111);
        assert_eq!(book.isbn, "0123456789");
        assert_eq!(book.copies, 3);
        assert_eq!(book.shelf, "1-2");
    }

    #[test]
    fn test_empty_optionals_map_to_sentinels() {
        let form = BookForm {
            title: "t".to_string(),
            author_last: "l".to_string(),
            author_first: "f".to_string(),
            ..BookForm::default()
        };
        let book = form.to_new_book().unwrap();
        assert_eq!(book.translator, "");
        assert_eq!(book.publication_year, UNSET_YEAR);
        assert_eq!(book.shelf, UNSET_SHELF);
        assert_eq!(book.copies, 1);
    }

    #[test]
    fn test_shelf_round_trip() {
        let shelf = join_shelf("1", "2");
        assert_eq!(shelf, "1-2");
        assert_eq!(split_shelf(&shelf), ("1".to_string(), "2".to_string()));
        assert_eq!(split_shelf("-"), (String::new(), String::new()));
    }

    #[test]
    fn test_split_name_edge_cases() {
        assert_eq!(split_name("TOLKIEN J.R."), ("TOLKIEN".to_string(), "J.R.".to_string()));
        assert_eq!(split_name("TOLKIEN"), ("TOLKIEN".to_string(), String::new()));
        assert_eq!(split_name("A B C"), ("A".to_string(), "B C".to_string()));
        assert_eq!(split_name(""), (String::new(), String::new()));
    }

    #[test]
    fn test_from_book() {
        let mut book = stored();
        book.translator = " ".to_string();
        book.shelf = "-".to_string();
        book.publication_year = UNSET_YEAR;

        let form = BookForm::from_book(&book);
        assert_eq!(form.author_last, "AUTHOR_LAST");
        assert_eq!(form.author_first, "AUTHOR_FIRST");
        assert_eq!(form.trans_last, "");
        assert_eq!(form.trans_first, "");
        assert_eq!(form.pub_year, "");
        assert_eq!(form.shelf_row, "");
        assert_eq!(form.num_of_copies, "3");
    }

    #[test]
    fn test_changed() {
        let book = stored();
        let mut form = filled();
        assert!(!form.changed(&book).unwrap());

        form.title = "title2".to_string();
        assert!(form.changed(&book).unwrap());
    }

    #[test]
    fn test_apply_then_unchanged() {
        let mut book = stored();
        let mut form = filled();
        form.title = "Y".to_string();
        assert!(form.changed(&book).unwrap());

        form.apply_to(&mut book).unwrap();
        assert!(!form.changed(&book).unwrap());
        assert_eq!(book.id, 4);
        assert_eq!(book.title, "Y");
        assert_eq!(book.genre, "EPIC");
    }

    #[test]
    fn test_form_round_trip() {
        let book = stored();
        let form = BookForm::from_book(&book);
        assert!(!form.changed(&book).unwrap());
    }
}
