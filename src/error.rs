//! Error types for Bookcase
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Errors are categorized by domain (validation, storage, files, configuration)
//! so the front end can decide how to present them.
//!
//! ## Error Kinds
//!
//! - **InvalidInput**: every validation failure. Raised before any mutating
//!   operation, so persisted state is never left inconsistent. Carries a
//!   [`ValidationError`] that identifies exactly which check failed.
//! - **RecordNotFound**: saving or deleting a record that the collection
//!   does not hold.
//! - **InstanceLocked**: the single-instance lock is already held by
//!   another process. Callers must abort startup.
//! - Storage, file and configuration failures wrap the underlying library
//!   errors via `#[from]`.

use crate::i18n::{Language, Message};
use thiserror::Error;

/// Result type alias using our BookcaseError type
pub type Result<T> = std::result::Result<T, BookcaseError>;

/// A single failed input check
///
/// Each variant corresponds to one check of the field validator (or to one
/// of the name checks performed by the store and file layer), and maps to
/// exactly one localizable [`Message`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title, author last name or author first name is empty
    #[error("Fields with asterisk (*) are mandatory")]
    MandatoryFields,

    /// A name or the publisher contains whitespace
    #[error("Use - instead of spaces in names")]
    SpacesInNames,

    /// Exactly one of translator first/last name is set
    #[error("Both First and Last translator names should be set")]
    TranslatorIncomplete,

    /// Year is longer than four characters or not all digits
    #[error("Invalid year format")]
    InvalidYear,

    /// ISBN is not 10 or 13 digits
    #[error("Invalid ISBN format - Must be 10 or 13 digit long")]
    InvalidIsbn,

    /// Shelf row or column is not a number
    #[error("Both Shelf column and row must be numbers")]
    ShelfNotNumeric,

    /// Exactly one of shelf row/column is set
    #[error("Both Shelf column and row must be set")]
    ShelfIncomplete,

    /// Copies is not a number greater or equal to one
    #[error("Number of copies must be a number greater than 1")]
    InvalidCopies,

    /// A record reached the store without title or author
    #[error("Title and author are required")]
    MissingTitleOrAuthor,

    /// Collection name is empty or contains whitespace
    #[error("Invalid collection name '{0}': use - instead of spaces in names")]
    InvalidCollectionName(String),

    /// File name does not follow the `bookcase_<name>.<ext>` convention
    #[error("'{0}' was not created by Bookcase Manager")]
    NotBookcaseFile(String),
}

impl ValidationError {
    /// Message key used to localize this failure
    pub fn message(&self) -> Message {
        match self {
            ValidationError::MandatoryFields | ValidationError::MissingTitleOrAuthor => {
                Message::MandatoryFieldsWarn
            }
            ValidationError::SpacesInNames | ValidationError::InvalidCollectionName(_) => {
                Message::NoSpacesInNamesWarn
            }
            ValidationError::TranslatorIncomplete => Message::TranslatorValidationWarn,
            ValidationError::InvalidYear => Message::YearValidationWarn,
            ValidationError::InvalidIsbn => Message::IsbnValidationWarn,
            ValidationError::ShelfNotNumeric => Message::ShelfNoNumbersWarn,
            ValidationError::ShelfIncomplete => Message::ShelfRowColNotSetWarn,
            ValidationError::InvalidCopies => Message::NumOfCopiesWarn,
            ValidationError::NotBookcaseFile(_) => Message::InvalidTransferFileMsg,
        }
    }

    /// Localized text for this failure
    pub fn localized(&self, language: Language) -> &'static str {
        self.message().text(language)
    }
}

/// Main error type for Bookcase
#[derive(Error, Debug)]
pub enum BookcaseError {
    // ===== Validation Errors =====

    /// Input rejected by a validation check
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    // ===== Database Errors =====

    /// Record is not part of this collection
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Generic database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Database schema migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    // ===== File Errors =====

    /// Another instance already holds the lock file
    #[error("Another instance is already running (lock file {0} exists)")]
    InstanceLocked(String),

    /// File or directory not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Generic file I/O error
    #[error("File I/O error: {0}")]
    FileIoError(String),

    // ===== Configuration Errors =====

    /// Configuration file error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ===== External Library Errors =====

    /// Database driver error from sqlx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// CSV reader/writer error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Settings file could not be parsed
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper methods for creating common errors
impl BookcaseError {
    /// Create a RecordNotFound error with a resource name
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        BookcaseError::RecordNotFound(resource.into())
    }

    /// The failed check, if this is a validation error
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            BookcaseError::InvalidInput(e) => Some(e),
            _ => None,
        }
    }

    /// Check if error is an input validation failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, BookcaseError::InvalidInput(_))
    }

    /// Check if error means the record does not belong to the collection
    pub fn is_not_found(&self) -> bool {
        matches!(self, BookcaseError::RecordNotFound(_))
    }

    /// Check if error is related to file/disk operations
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            BookcaseError::FileNotFound(_)
                | BookcaseError::FileIoError(_)
                | BookcaseError::InstanceLocked(_)
                | BookcaseError::IoError(_)
        )
    }

    /// Get user-friendly error message suitable for display
    ///
    /// Validation failures are localized; everything else falls back to the
    /// English `Display` text.
    pub fn user_message(&self, language: Language) -> String {
        match self {
            BookcaseError::InvalidInput(e) => e.localized(language).to_string(),
            BookcaseError::InstanceLocked(path) => {
                format!("Bookcase Manager is already running (remove {} if it is not).", path)
            }
            _ => self.to_string(),
        }
    }
}
