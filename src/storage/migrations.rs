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


//! Database migrations
//!
//! This module handles database schema creation and migrations.
//!
//! # Schema Versions
//! 1. `initial_schema` - the `books` table without genre. Collections
//!    written by older releases already have this table; the statement is
//!    `IF NOT EXISTS`, so they are adopted as-is.
//! 2. `add_genre` - adds the `genre` column unless it is already there.
//!
//! Applied versions are tracked in the `_migrations` table, so every
//! collection file is upgraded exactly once.

use crate::error::Result;
use sqlx::{Executor, SqlitePool};

/// Latest schema version
pub const SCHEMA_VERSION: i32 = 2;

/// Run all database migrations
///
/// Idempotent: already-applied migrations are skipped.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    // Create migrations tracking table
    create_migrations_table(pool).await?;

    // Run all migrations in order
    run_migration(pool, 1, "initial_schema", create_initial_schema(pool)).await?;
    run_migration(pool, 2, "add_genre", add_genre_column(pool)).await?;

    Ok(())
}

/// Highest applied migration, 0 for an empty file
pub async fn schema_version(pool: &SqlitePool) -> Result<i32> {
    let version: Option<i32> = sqlx::query_scalar("SELECT MAX(id) FROM _migrations")
        .fetch_one(pool)
        .await?;

    Ok(version.unwrap_or(0))
}

/// Create migrations tracking table
async fn create_migrations_table(pool: &SqlitePool) -> Result<()> {
    pool.execute(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .await?;

    Ok(())
}

/// Run a single migration if it hasn't been applied yet
async fn run_migration(
    pool: &SqlitePool,
    id: i32,
    name: &str,
    migration_fn: impl std::future::Future<Output = Result<()>>,
) -> Result<()> {
    // Check if migration has been applied
    let applied: Option<i32> = sqlx::query_scalar("SELECT id FROM _migrations WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    if applied.is_some() {
        return Ok(());
    }

    migration_fn.await?;

    sqlx::query("INSERT INTO _migrations (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;

    tracing::info!(id, name, "applied schema migration");
    Ok(())
}

/// Create the books table
async fn create_initial_schema(pool: &SqlitePool) -> Result<()> {
    pool.execute(
        r#"
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,

    -- Mandatory, uppercased
    title TEXT NOT NULL,
    author TEXT NOT NULL,               -- "LAST FIRST"

    -- Optional
    translator TEXT NOT NULL DEFAULT '', -- "LAST FIRST"
    publication_year INTEGER NOT NULL DEFAULT -1,
    isbn TEXT NOT NULL DEFAULT '',
    publisher TEXT NOT NULL DEFAULT '',
    shelf TEXT NOT NULL DEFAULT '-',    -- "ROW-COLUMN"
    copies INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_books_isbn ON books(isbn);
CREATE INDEX IF NOT EXISTS idx_books_shelf ON books(shelf);
        "#,
    )
    .await?;

    Ok(())
}

/// Add the genre column to collections created before it existed
async fn add_genre_column(pool: &SqlitePool) -> Result<()> {
    if column_exists(pool, "books", "genre").await? {
        return Ok(());
    }

    pool.execute("ALTER TABLE books ADD COLUMN genre TEXT NOT NULL DEFAULT ''")
        .await?;

    Ok(())
}

async fn column_exists(pool: &SqlitePool, table: &str, column: &str) -> Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_one(pool)
            .await?;

    Ok(count > 0)
}
