//! Record Store
//!
//! [`Bookcase`] binds one named collection (one `<name>.db` file) and
//! exposes every record operation the front ends use. All text it persists
//! is in canonical form, and every input check runs before the first write.
//!
//! # Usage Example
//! ```no_run
//! use bookcase::storage::{Bookcase, NewBook, SearchField};
//!
//! # async fn example() -> bookcase::Result<()> {
//! let shelf = Bookcase::open("/tmp/bookcase", "home").await?;
//! shelf.add_book(NewBook::new("The Hobbit", "Tolkien J.R.")).await?;
//!
//! let found = shelf.search(SearchField::Author, "tolkien").await?;
//! assert_eq!(found[0].title, "THE HOBBIT");
//! shelf.close().await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{BookcaseError, Result, ValidationError};
use crate::storage::database::Database;
use crate::storage::models::{book_header, Book, NewBook, SearchField};
use crate::storage::queries;
use crate::transfer::{indexes_for_attributes, materialize_rows, ImportReport, Table};
use std::path::{Path, PathBuf};

/// File extension of a collection
pub const COLLECTION_EXTENSION: &str = "db";

/// Collection opened when none is named
pub const DEFAULT_COLLECTION: &str = "bookcase";

/// Check a collection name and strip a trailing `.db`
///
/// Names are used verbatim as file stems and must be non-empty with no
/// whitespace.
pub fn validate_collection_name(name: &str) -> Result<String> {
    let stem = name.strip_suffix(".db").unwrap_or(name);

    if stem.is_empty() || stem.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidCollectionName(name.to_string()).into());
    }

    Ok(stem.to_string())
}

/// Path of the collection file `name` inside `location`
pub fn collection_path(location: &Path, name: &str) -> Result<PathBuf> {
    let stem = validate_collection_name(name)?;
    Ok(location.join(format!("{}.{}", stem, COLLECTION_EXTENSION)))
}

/// One open collection of books
#[derive(Debug)]
pub struct Bookcase {
    name: String,
    db: Database,
}

impl Bookcase {
    /// Open the collection `name` in `location`, creating it if absent
    ///
    /// # Errors
    /// `InvalidInput` for a malformed name (nothing is created), otherwise
    /// any storage error from opening or migrating the file.
    pub async fn open(location: impl AsRef<Path>, name: &str) -> Result<Self> {
        let path = collection_path(location.as_ref(), name)?;
        let name = validate_collection_name(name)?;
        let db = Database::new(&path).await?;

        tracing::info!(collection = %name, path = %path.display(), "opened collection");
        Ok(Self { name, db })
    }

    /// Open a throwaway collection held in memory
    pub async fn open_in_memory(name: &str) -> Result<Self> {
        let name = validate_collection_name(name)?;
        let db = Database::new_in_memory().await?;
        Ok(Self { name, db })
    }

    /// Collection name (the file stem)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backing file, `None` for in-memory collections
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    /// Ensure the storage structure exists
    ///
    /// Opening already does this; calling it again is harmless.
    pub async fn create_schema(&self) -> Result<()> {
        self.db.migrate().await
    }

    // ========================================================================
    // RECORDS
    // ========================================================================

    /// Persist a new record
    ///
    /// # Errors
    /// `InvalidInput(MissingTitleOrAuthor)` if title or author is blank,
    /// `InvalidInput(InvalidCopies)` for fewer than one copy; nothing is
    /// written in either case.
    pub async fn add_book(&self, book: NewBook) -> Result<Book> {
        book.check()?;

        let book = queries::insert_book(self.db.pool(), &book).await?;
        tracing::info!(collection = %self.name, id = book.id, "added book");
        Ok(book)
    }

    /// Write the in-memory state of `book` back to the collection
    ///
    /// `book` is brought into canonical form on the way. Runs the same
    /// checks as [`add_book`](Self::add_book) before writing.
    pub async fn save_book(&self, book: &mut Book) -> Result<()> {
        book.to_new_book().check()?;
        queries::update_book(self.db.pool(), book).await
    }

    /// Remove one record
    ///
    /// # Errors
    /// `RecordNotFound` if the collection has no record with this id.
    pub async fn delete_book(&self, book: &Book) -> Result<()> {
        queries::delete_book(self.db.pool(), book.id).await?;
        tracing::info!(collection = %self.name, id = book.id, "deleted book");
        Ok(())
    }

    /// Look up a record by id
    pub async fn get_book(&self, id: i64) -> Result<Book> {
        queries::find_book_by_id(self.db.pool(), id)
            .await?
            .ok_or_else(|| BookcaseError::not_found(format!("book {}", id)))
    }

    /// Delete every record
    pub async fn clear(&self) -> Result<u64> {
        let removed = queries::delete_all_books(self.db.pool()).await?;
        tracing::info!(collection = %self.name, removed, "cleared collection");
        Ok(removed)
    }

    /// Every record, in insertion order
    pub async fn list(&self) -> Result<Vec<Book>> {
        queries::list_books(self.db.pool()).await
    }

    pub async fn count(&self) -> Result<i64> {
        queries::count_books(self.db.pool()).await
    }

    // ========================================================================
    // SEARCH
    // ========================================================================

    /// Search one field: substring match for text fields, exact match for
    /// ISBN and shelf
    pub async fn search(&self, field: SearchField, query: &str) -> Result<Vec<Book>> {
        match field {
            SearchField::Title => self.search_by_title(query).await,
            SearchField::Author => self.search_by_author(query).await,
            SearchField::Isbn => self.search_by_isbn(query).await,
            SearchField::Shelf => self.search_by_shelf(query).await,
            SearchField::Genre => self.search_by_genre(query).await,
        }
    }

    pub async fn search_by_title(&self, title: &str) -> Result<Vec<Book>> {
        queries::search_books_by_title(self.db.pool(), title).await
    }

    pub async fn search_by_author(&self, author: &str) -> Result<Vec<Book>> {
        queries::search_books_by_author(self.db.pool(), author).await
    }

    pub async fn search_by_genre(&self, genre: &str) -> Result<Vec<Book>> {
        queries::search_books_by_genre(self.db.pool(), genre).await
    }

    pub async fn search_by_isbn(&self, isbn: &str) -> Result<Vec<Book>> {
        queries::search_books_by_isbn(self.db.pool(), isbn).await
    }

    pub async fn search_by_shelf(&self, shelf: &str) -> Result<Vec<Book>> {
        queries::search_books_by_shelf(self.db.pool(), shelf).await
    }

    // ========================================================================
    // TRANSFER
    // ========================================================================

    /// Dump the collection: the canonical header, then one row per record
    pub async fn dump_table(&self) -> Result<Table> {
        let mut table = Table::with_header(book_header());
        for book in self.list().await? {
            table.push_row(book.row());
        }
        Ok(table)
    }

    /// Insert every usable row of `table` as a new record
    ///
    /// Columns are matched by header name. Rows without title or author, or
    /// with a non-numeric year or copies, are skipped and listed in the
    /// report; they never abort the import. The insert itself is one
    /// transaction.
    pub async fn import_table(&self, table: &Table) -> Result<ImportReport> {
        let Some(header) = table.header() else {
            return Ok(ImportReport::default());
        };

        let index = indexes_for_attributes(header);
        let (books, skipped) = materialize_rows(&index, table.data_rows(), 1);
        let imported = queries::insert_books(self.db.pool(), &books).await?;

        tracing::info!(
            collection = %self.name,
            imported,
            skipped = skipped.len(),
            "imported table"
        );
        Ok(ImportReport { imported, skipped })
    }

    /// Release the session
    pub async fn close(self) -> Result<()> {
        tracing::info!(collection = %self.name, "closing collection");
        self.db.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::BookAttribute;
    use crate::transfer::{Cell, SkipReason};

    async fn shelf() -> Bookcase {
        Bookcase::open_in_memory("test").await.expect("Failed to open collection")
    }

    #[test]
    fn test_validate_collection_name() {
        assert_eq!(validate_collection_name("home").unwrap(), "home");
        assert_eq!(validate_collection_name("home.db").unwrap(), "home");
        assert!(validate_collection_name("my books").unwrap_err().is_invalid_input());
        assert!(validate_collection_name("").unwrap_err().is_invalid_input());
        assert!(validate_collection_name(".db").unwrap_err().is_invalid_input());
    }

    #[tokio::test]
    async fn test_open_rejects_spaces_before_creating_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let err = Bookcase::open(temp_dir.path(), "my books").await.unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_open_creates_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let shelf = Bookcase::open(temp_dir.path(), "home").await.unwrap();

        assert_eq!(shelf.name(), "home");
        assert!(temp_dir.path().join("home.db").exists());
        shelf.create_schema().await.expect("Schema should be idempotent");
        shelf.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_add_book_requires_title_and_author() {
        let shelf = shelf().await;

        let err = shelf.add_book(NewBook::new("Emma", "")).await.unwrap_err();
        assert_eq!(err.validation(), Some(&ValidationError::MissingTitleOrAuthor));
        assert_eq!(shelf.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_book_persists_changes() {
        let shelf = shelf().await;
        let mut book = shelf.add_book(NewBook::new("Emma", "Austen Jane")).await.unwrap();

        book.genre = "novel".to_string();
        shelf.save_book(&mut book).await.unwrap();

        let stored = shelf.get_book(book.id).await.unwrap();
        assert_eq!(stored.genre, "NOVEL");
        assert_eq!(stored, book);
    }

    #[tokio::test]
    async fn test_copies_below_one_rejected_before_write() {
        let shelf = shelf().await;

        let err = shelf
            .add_book(NewBook {
                copies: 0,
                ..NewBook::new("Emma", "Austen Jane")
            })
            .await
            .unwrap_err();
        assert_eq!(err.validation(), Some(&ValidationError::InvalidCopies));
        assert_eq!(shelf.count().await.unwrap(), 0);

        let mut book = shelf.add_book(NewBook::new("Emma", "Austen Jane")).await.unwrap();
        book.copies = -3;
        let err = shelf.save_book(&mut book).await.unwrap_err();
        assert_eq!(err.validation(), Some(&ValidationError::InvalidCopies));
        assert_eq!(shelf.get_book(book.id).await.unwrap().copies, 1);
    }

    #[tokio::test]
    async fn test_search_dispatch() {
        let shelf = shelf().await;
        shelf
            .add_book(NewBook {
                shelf: "2-3".to_string(),
                genre: "Fantasy".to_string(),
                ..NewBook::new("The Hobbit", "Tolkien J.R.")
            })
            .await
            .unwrap();

        assert_eq!(shelf.search(SearchField::Genre, "fant").await.unwrap().len(), 1);
        assert_eq!(shelf.search(SearchField::Shelf, "2-3").await.unwrap().len(), 1);
        assert_eq!(shelf.search(SearchField::Shelf, "2").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_import_reports_skipped_rows() {
        let shelf = shelf().await;
        let mut table = Table::with_header(["author", "title", "copies"]);
        table.push_row(vec![Cell::from("Austen Jane"), Cell::from("Emma"), Cell::Integer(2)]);
        table.push_row(vec![Cell::Empty, Cell::from("Nobody's Book"), Cell::Empty]);
        table.push_row(vec![Cell::from("X Y"), Cell::from("Bad"), Cell::from("many")]);

        let report = shelf.import_table(&table).await.unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped_count(), 2);
        assert_eq!(report.skipped[0].row, 2);
        assert_eq!(report.skipped[0].reason, SkipReason::MissingAuthor);

        let books = shelf.list().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "EMMA");
        assert_eq!(books[0].copies, 2);
    }

    #[tokio::test]
    async fn test_import_skips_copies_below_one() {
        let shelf = shelf().await;
        let mut table = Table::with_header(["title", "author", "copies"]);
        table.push_row(vec![Cell::from("Emma"), Cell::from("Austen Jane"), Cell::from("0")]);
        table.push_row(vec![Cell::from("Persuasion"), Cell::from("Austen Jane"), Cell::Integer(-3)]);
        table.push_row(vec![Cell::from("Sanditon"), Cell::from("Austen Jane"), Cell::Integer(2)]);

        let report = shelf.import_table(&table).await.unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped_count(), 2);
        assert_eq!(
            report.skipped[1].reason,
            SkipReason::InvalidNumber {
                attribute: BookAttribute::Copies,
                value: "-3".to_string()
            }
        );

        let copies: Vec<i32> = shelf.list().await.unwrap().iter().map(|b| b.copies).collect();
        assert_eq!(copies, vec![2]);
    }

    #[tokio::test]
    async fn test_import_empty_table() {
        let shelf = shelf().await;
        let report = shelf.import_table(&Table::default()).await.unwrap();
        assert_eq!(report, ImportReport::default());
    }
}
