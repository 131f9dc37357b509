// Bookcase - Personal Library Catalog
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Database query functions
//!
//! Plain functions over a pool, one per statement. Every write goes through
//! [`NewBook::canonical`], so whatever the caller passes is stored
//! uppercased.
//!
//! # Query Patterns
//! - Substring searches (title, author, genre) uppercase the needle and use
//!   `instr`, so `%` and `_` in user input match literally.
//! - ISBN and shelf searches are exact.
//! - Results come back in insertion order.

use crate::error::{BookcaseError, Result};
use crate::storage::models::*;
use sqlx::{Sqlite, SqlitePool};

/// Column list for `Book`; legacy files may hold NULLs in optional columns
const BOOK_COLUMNS: &str = r#"
    id,
    COALESCE(title, '') AS title,
    COALESCE(author, '') AS author,
    COALESCE(translator, '') AS translator,
    COALESCE(publisher, '') AS publisher,
    COALESCE(publication_year, -1) AS publication_year,
    COALESCE(isbn, '') AS isbn,
    COALESCE(copies, 1) AS copies,
    COALESCE(shelf, '-') AS shelf,
    COALESCE(genre, '') AS genre
"#;

fn select_books(filter: &str) -> String {
    format!("SELECT {} FROM books {} ORDER BY id", BOOK_COLUMNS, filter)
}

// ============================================================================
// BOOK QUERIES
// ============================================================================

async fn insert_with<'e, E>(executor: E, book: &NewBook) -> Result<i64>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO books (
            title, author, translator, publisher, publication_year,
            isbn, copies, shelf, genre
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(&book.translator)
    .bind(&book.publisher)
    .bind(book.publication_year)
    .bind(&book.isbn)
    .bind(book.copies)
    .bind(&book.shelf)
    .bind(&book.genre)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Insert a new book
///
/// Returns the stored record, with its new id.
pub async fn insert_book(pool: &SqlitePool, book: &NewBook) -> Result<Book> {
    let book = book.clone().canonical();
    let id = insert_with(pool, &book).await?;
    tracing::debug!(id, title = %book.title, "inserted book");

    find_book_by_id(pool, id)
        .await?
        .ok_or_else(|| BookcaseError::DatabaseError(format!("book {} vanished after insert", id)))
}

/// Insert many books in one transaction
///
/// Either every book is inserted or none is. Returns the number inserted.
pub async fn insert_books(pool: &SqlitePool, books: &[NewBook]) -> Result<usize> {
    let mut tx = pool.begin().await?;
    for book in books {
        insert_with(&mut *tx, &book.clone().canonical()).await?;
    }
    tx.commit().await?;

    Ok(books.len())
}

/// Find book by ID
pub async fn find_book_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Book>> {
    let book = sqlx::query_as::<_, Book>(&select_books("WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(book)
}

/// Write every field of an existing book
///
/// The record is canonicalized in place before it is written. Fails with
/// `RecordNotFound` if no row has the book's id.
pub async fn update_book(pool: &SqlitePool, book: &mut Book) -> Result<()> {
    let id = book.id;
    book.apply(book.to_new_book());

    let result = sqlx::query(
        r#"
        UPDATE books SET
            title = ?, author = ?, translator = ?, publisher = ?,
            publication_year = ?, isbn = ?, copies = ?, shelf = ?, genre = ?
        WHERE id = ?
        "#,
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(&book.translator)
    .bind(&book.publisher)
    .bind(book.publication_year)
    .bind(&book.isbn)
    .bind(book.copies)
    .bind(&book.shelf)
    .bind(&book.genre)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BookcaseError::not_found(format!("book {}", id)));
    }

    tracing::debug!(id, "updated book");
    Ok(())
}

/// Delete a book
///
/// Fails with `RecordNotFound` if no row has the id.
pub async fn delete_book(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BookcaseError::not_found(format!("book {}", id)));
    }

    tracing::debug!(id, "deleted book");
    Ok(())
}

/// Delete every book, returning how many were removed
pub async fn delete_all_books(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM books").execute(pool).await?;
    Ok(result.rows_affected())
}

/// List all books in insertion order
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<Book>> {
    let books = sqlx::query_as::<_, Book>(&select_books(""))
        .fetch_all(pool)
        .await?;

    Ok(books)
}

/// Count total books
pub async fn count_books(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Case-insensitive substring search on one text column
async fn search_contains(pool: &SqlitePool, column: &str, needle: &str) -> Result<Vec<Book>> {
    let filter = format!("WHERE instr(COALESCE({}, ''), ?) > 0", column);
    let books = sqlx::query_as::<_, Book>(&select_books(&filter))
        .bind(needle.to_uppercase())
        .fetch_all(pool)
        .await?;

    Ok(books)
}

/// Exact match on one column
async fn search_exact(pool: &SqlitePool, column: &str, value: &str) -> Result<Vec<Book>> {
    let filter = format!("WHERE {} = ?", column);
    let books = sqlx::query_as::<_, Book>(&select_books(&filter))
        .bind(value)
        .fetch_all(pool)
        .await?;

    Ok(books)
}

/// Search books by title
pub async fn search_books_by_title(pool: &SqlitePool, title: &str) -> Result<Vec<Book>> {
    search_contains(pool, "title", title).await
}

/// Search books by author
pub async fn search_books_by_author(pool: &SqlitePool, author: &str) -> Result<Vec<Book>> {
    search_contains(pool, "author", author).await
}

/// Search books by genre
pub async fn search_books_by_genre(pool: &SqlitePool, genre: &str) -> Result<Vec<Book>> {
    search_contains(pool, "genre", genre).await
}

/// Find books with exactly this ISBN
pub async fn search_books_by_isbn(pool: &SqlitePool, isbn: &str) -> Result<Vec<Book>> {
    search_exact(pool, "isbn", isbn).await
}

/// Find books on exactly this shelf
pub async fn search_books_by_shelf(pool: &SqlitePool, shelf: &str) -> Result<Vec<Book>> {
    search_exact(pool, "shelf", shelf).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::Database;

    #[tokio::test]
    async fn test_insert_and_find_book() {
        let db = Database::new_in_memory().await.expect("Failed to create database");

        let book = insert_book(db.pool(), &NewBook::new("Test Book", "Doe John"))
            .await
            .expect("Failed to insert book");
        assert!(book.id > 0);
        assert_eq!(book.title, "TEST BOOK");

        let found = find_book_by_id(db.pool(), book.id)
            .await
            .expect("Failed to find book");
        assert_eq!(found, Some(book));
    }

    #[tokio::test]
    async fn test_insert_books_in_one_transaction() {
        let db = Database::new_in_memory().await.expect("Failed to create database");

        let books = vec![NewBook::new("a", "x y"), NewBook::new("b", "x y")];
        let inserted = insert_books(db.pool(), &books).await.expect("Failed to insert");

        assert_eq!(inserted, 2);
        assert_eq!(count_books(db.pool()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_book() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let mut book = insert_book(db.pool(), &NewBook::new("Original", "Doe John"))
            .await
            .unwrap();

        book.title = "updated".to_string();
        update_book(db.pool(), &mut book).await.expect("Failed to update");
        assert_eq!(book.title, "UPDATED");

        let found = find_book_by_id(db.pool(), book.id).await.unwrap().unwrap();
        assert_eq!(found.title, "UPDATED");
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let mut book = insert_book(db.pool(), &NewBook::new("a", "b c")).await.unwrap();
        book.id += 100;

        assert!(update_book(db.pool(), &mut book).await.unwrap_err().is_not_found());
        assert!(delete_book(db.pool(), book.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        insert_book(db.pool(), &NewBook::new("100% Wool", "a b")).await.unwrap();
        insert_book(db.pool(), &NewBook::new("1000 Wools", "a b")).await.unwrap();

        let found = search_books_by_title(db.pool(), "0% w").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "100% WOOL");
    }

    #[tokio::test]
    async fn test_delete_all_books() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        insert_books(db.pool(), &[NewBook::new("a", "b c"), NewBook::new("d", "e f")])
            .await
            .unwrap();

        assert_eq!(delete_all_books(db.pool()).await.unwrap(), 2);
        assert!(list_books(db.pool()).await.unwrap().is_empty());
    }
}
