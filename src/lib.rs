//! Bookcase - personal library catalog
//!
//! Books are kept in named collections, one SQLite file each, inside a
//! per-user data directory.
//!
//! - [`form`]: the entry form, its validation and conversion to records
//! - [`storage`]: the record store ([`Bookcase`])
//! - [`transfer`]: tables for spreadsheet import/export
//! - [`file`]: data directory, file naming and the instance lock
//! - [`settings`], [`i18n`]: configuration and localized messages

pub mod error;
pub mod file;
pub mod form;
pub mod i18n;
pub mod logging;
pub mod settings;
pub mod storage;
pub mod transfer;

pub use error::{BookcaseError, Result, ValidationError};
pub use file::{DataDirectory, InstanceLock};
pub use form::BookForm;
pub use i18n::{Language, Message};
pub use settings::Settings;
pub use storage::{Book, BookAttribute, Bookcase, NewBook, SearchField};
pub use transfer::{Cell, CsvCodec, ImportReport, Table, TableCodec, TransferFormat};
