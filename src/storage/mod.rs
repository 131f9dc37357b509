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


//! Database storage and models
//!
//! Every collection is one SQLite file holding a single `books` table,
//! accessed with sqlx.
//!
//! # Database Schema
//! - `books`: one row per record, text in canonical (uppercase) form
//! - `_migrations`: applied schema versions
//!
//! # Layers
//! - [`Database`]: the connection (one session per collection)
//! - [`queries`]: one function per SQL statement
//! - [`Bookcase`]: the record store used by front ends
//!
//! # Usage Example
//! ```no_run
//! use bookcase::storage::{Database, queries, NewBook};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("./home.db").await?;
//!
//! let book = queries::insert_book(db.pool(), &NewBook::new("Emma", "Austen Jane")).await?;
//! let found = queries::search_books_by_isbn(db.pool(), &book.isbn).await?;
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

// Re-export commonly used types
pub use collection::{
    collection_path, validate_collection_name, Bookcase, COLLECTION_EXTENSION, DEFAULT_COLLECTION,
};
pub use database::Database;
pub use models::{
    book_header, Book, BookAttribute, NewBook, SearchField, DEFAULT_COPIES, UNSET_SHELF,
    UNSET_YEAR,
};
