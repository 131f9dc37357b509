//! Database models for Bookcase
//!
//! # Canonical Form
//! Every persisted record is stored in canonical form:
//! - text fields (title, author, translator, publisher, genre) uppercased
//! - names as `"LAST FIRST"`
//! - shelf as `"ROW-COLUMN"`, with `"-"` meaning "no shelf"
//! - publication year `-1` meaning "no year"
//!
//! [`NewBook::canonical`] produces that form; the query layer applies it to
//! every insert and update, so callers may hand in mixed-case values.

use crate::error::ValidationError;
use crate::transfer::Cell;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Stored publication year when none is known
pub const UNSET_YEAR: i32 = -1;

/// Stored shelf when none is assigned
pub const UNSET_SHELF: &str = "-";

/// Default number of copies
pub const DEFAULT_COPIES: i32 = 1;

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// Book attributes, in transfer header order
///
/// This is the enumerable (name, accessor) list used wherever code has to
/// walk a record's fields generically: table dumps, header resolution and
/// row materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookAttribute {
    Title,
    Author,
    Translator,
    Publisher,
    PublicationYear,
    Isbn,
    Copies,
    Shelf,
    Genre,
}

impl BookAttribute {
    /// All attributes in canonical header order
    pub const ALL: [BookAttribute; 9] = [
        BookAttribute::Title,
        BookAttribute::Author,
        BookAttribute::Translator,
        BookAttribute::Publisher,
        BookAttribute::PublicationYear,
        BookAttribute::Isbn,
        BookAttribute::Copies,
        BookAttribute::Shelf,
        BookAttribute::Genre,
    ];

    /// Attribute name as it appears in headers and column names
    pub fn name(&self) -> &'static str {
        match self {
            BookAttribute::Title => "title",
            BookAttribute::Author => "author",
            BookAttribute::Translator => "translator",
            BookAttribute::Publisher => "publisher",
            BookAttribute::PublicationYear => "publication_year",
            BookAttribute::Isbn => "isbn",
            BookAttribute::Copies => "copies",
            BookAttribute::Shelf => "shelf",
            BookAttribute::Genre => "genre",
        }
    }
}

impl fmt::Display for BookAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BookAttribute {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookAttribute::ALL
            .iter()
            .copied()
            .find(|attribute| attribute.name() == s)
            .ok_or(())
    }
}

/// The canonical header: attribute names in order
pub fn book_header() -> Vec<&'static str> {
    BookAttribute::ALL.iter().map(|a| a.name()).collect()
}

/// Field a search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Case-insensitive substring
    Title,
    /// Case-insensitive substring
    Author,
    /// Exact match
    Isbn,
    /// Exact match
    Shelf,
    /// Case-insensitive substring
    Genre,
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "isbn" => Ok(SearchField::Isbn),
            "shelf" => Ok(SearchField::Shelf),
            "genre" => Ok(SearchField::Genre),
            other => Err(format!("unknown search field '{}'", other)),
        }
    }
}

// ============================================================================
// MAIN ENTITIES
// ============================================================================

/// Book entity - a persisted record
///
/// `id` is the surrogate key assigned by the store. No other field is
/// unique; duplicate titles and ISBNs are legal.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Book {
    /// Primary key (auto-increment)
    pub id: i64,
    pub title: String,
    /// `"LAST FIRST"`
    pub author: String,
    /// `"LAST FIRST"`, or empty
    pub translator: String,
    pub publisher: String,
    /// `-1` when unset
    pub publication_year: i32,
    pub isbn: String,
    pub copies: i32,
    /// `"ROW-COLUMN"`, or `"-"` when unset
    pub shelf: String,
    pub genre: String,
}

impl Book {
    /// Publication year, if one is set
    pub fn year(&self) -> Option<i32> {
        (self.publication_year > 0).then_some(self.publication_year)
    }

    /// Value of one attribute as a transfer cell
    pub fn cell(&self, attribute: BookAttribute) -> Cell {
        match attribute {
            BookAttribute::Title => Cell::from(self.title.as_str()),
            BookAttribute::Author => Cell::from(self.author.as_str()),
            BookAttribute::Translator => Cell::from(self.translator.as_str()),
            BookAttribute::Publisher => Cell::from(self.publisher.as_str()),
            BookAttribute::PublicationYear => Cell::Integer(i64::from(self.publication_year)),
            BookAttribute::Isbn => Cell::from(self.isbn.as_str()),
            BookAttribute::Copies => Cell::Integer(i64::from(self.copies)),
            BookAttribute::Shelf => Cell::from(self.shelf.as_str()),
            BookAttribute::Genre => Cell::from(self.genre.as_str()),
        }
    }

    /// Row projection in canonical header order
    pub fn row(&self) -> Vec<Cell> {
        BookAttribute::ALL.iter().map(|a| self.cell(*a)).collect()
    }

    /// Replace every stored field with the canonical form of `fields`
    ///
    /// The id is kept. Nothing is written until the record is saved.
    pub fn apply(&mut self, fields: NewBook) {
        let fields = fields.canonical();
        self.title = fields.title;
        self.author = fields.author;
        self.translator = fields.translator;
        self.publisher = fields.publisher;
        self.publication_year = fields.publication_year;
        self.isbn = fields.isbn;
        self.copies = fields.copies;
        self.shelf = fields.shelf;
        self.genre = fields.genre;
    }

    /// Field values without the id
    pub fn to_new_book(&self) -> NewBook {
        NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            translator: self.translator.clone(),
            publisher: self.publisher.clone(),
            publication_year: self.publication_year,
            isbn: self.isbn.clone(),
            copies: self.copies,
            shelf: self.shelf.clone(),
            genre: self.genre.clone(),
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {} | {}",
            self.title, self.author, self.publisher, self.publication_year, self.shelf
        )
    }
}

// ============================================================================
// INSERT MODELS
// ============================================================================

/// New book record for insertion
///
/// Defaults mirror an empty record: no translator, publisher, ISBN or genre,
/// year `-1`, shelf `"-"`, one copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub translator: String,
    pub publisher: String,
    pub publication_year: i32,
    pub isbn: String,
    pub copies: i32,
    pub shelf: String,
    pub genre: String,
}

impl Default for NewBook {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            translator: String::new(),
            publisher: String::new(),
            publication_year: UNSET_YEAR,
            isbn: String::new(),
            copies: DEFAULT_COPIES,
            shelf: UNSET_SHELF.to_string(),
            genre: String::new(),
        }
    }
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    /// Whether both mandatory fields carry a value
    pub fn has_title_and_author(&self) -> bool {
        !self.title.trim().is_empty() && !self.author.trim().is_empty()
    }

    /// Checks every record must pass before it is written
    pub fn check(&self) -> Result<(), ValidationError> {
        if !self.has_title_and_author() {
            return Err(ValidationError::MissingTitleOrAuthor);
        }
        if self.copies < DEFAULT_COPIES {
            return Err(ValidationError::InvalidCopies);
        }
        Ok(())
    }

    /// Canonical stored form: text fields uppercased, empty shelf as `"-"`
    pub fn canonical(self) -> Self {
        Self {
            title: self.title.to_uppercase(),
            author: self.author.to_uppercase(),
            translator: self.translator.to_uppercase(),
            publisher: self.publisher.to_uppercase(),
            publication_year: self.publication_year,
            isbn: self.isbn,
            copies: self.copies,
            shelf: if self.shelf.is_empty() {
                UNSET_SHELF.to_string()
            } else {
                self.shelf.to_uppercase()
            },
            genre: self.genre.to_uppercase(),
        }
    }
}
