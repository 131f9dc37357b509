//! Book entry form
//!
//! A [`BookForm`] holds the raw strings a user typed for one book, split the
//! way the entry screen shows them: author and translator as separate last
//! and first names, shelf as separate row and column. [`validation`] checks
//! the values before they go anywhere; [`mapping`] converts between the form
//! and the stored [`Book`](crate::storage::Book) representation.

pub mod mapping;
pub mod validation;

use serde::{Deserialize, Serialize};

pub use mapping::{join_name, join_shelf, split_name, split_shelf};

/// Raw field values of the book entry form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookForm {
    pub title: String,
    pub author_last: String,
    pub author_first: String,
    pub trans_last: String,
    pub trans_first: String,
    pub publisher: String,
    pub pub_year: String,
    pub isbn: String,
    pub num_of_copies: String,
    pub shelf_row: String,
    pub shelf_col: String,
}

impl Default for BookForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author_last: String::new(),
            author_first: String::new(),
            trans_last: String::new(),
            trans_first: String::new(),
            publisher: String::new(),
            pub_year: String::new(),
            isbn: String::new(),
            num_of_copies: "1".to_string(),
            shelf_row: String::new(),
            shelf_col: String::new(),
        }
    }
}

impl BookForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every entry to its empty value
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
