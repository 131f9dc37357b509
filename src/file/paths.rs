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


//! Data directory layout and file naming
//!
//! Everything lives in one per-user folder (`~/BookcaseDb` by default):
//! - `<name>.db` - one file per collection
//! - `bookcase_<name>.xlsx` / `bookcase_<name>.csv` - exported tables
//! - `config.ini` - settings
//! - `.lock` - single-instance lock

use crate::error::{BookcaseError, Result, ValidationError};
use crate::storage::collection::{self, COLLECTION_EXTENSION};
use crate::transfer::TransferFormat;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "BOOKCASE_DATA_DIR";

/// Folder name under the home directory
pub const DATA_DIR_NAME: &str = "BookcaseDb";

/// Settings file name
pub const SETTINGS_FILE: &str = "config.ini";

/// Prefix of every exported table
pub const TRANSFER_PREFIX: &str = "bookcase_";

lazy_static! {
    static ref XLSX_FILENAME: Regex = transfer_regex(TransferFormat::Xlsx);
    static ref CSV_FILENAME: Regex = transfer_regex(TransferFormat::Csv);
}

fn transfer_regex(format: TransferFormat) -> Regex {
    let pattern = format!(
        r"^{}(.+)\.{}$",
        regex::escape(TRANSFER_PREFIX),
        regex::escape(format.extension())
    );
    Regex::new(&pattern).expect("Failed to compile transfer filename pattern")
}

fn transfer_pattern(format: TransferFormat) -> &'static Regex {
    match format {
        TransferFormat::Xlsx => &XLSX_FILENAME,
        TransferFormat::Csv => &CSV_FILENAME,
    }
}

/// Get default data directory for the platform
///
/// `BOOKCASE_DATA_DIR` wins when set; otherwise `BookcaseDb` under the home
/// directory, falling back to the working directory.
pub fn default_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    #[cfg(target_os = "windows")]
    let home = std::env::var_os("USERPROFILE");
    #[cfg(not(target_os = "windows"))]
    let home = std::env::var_os("HOME");

    match home {
        Some(home) => PathBuf::from(home).join(DATA_DIR_NAME),
        None => PathBuf::from(DATA_DIR_NAME),
    }
}

/// Exported file name for a collection: `bookcase_<name>.<ext>`
pub fn transfer_filename(name: &str, format: TransferFormat) -> String {
    format!("{}{}.{}", TRANSFER_PREFIX, name, format.extension())
}

/// Check an exported file name and return the collection name inside it
///
/// # Errors
/// `InvalidInput(NotBookcaseFile)` unless the name is exactly
/// `bookcase_<name>.<ext>` for the given format.
pub fn validate_transfer_filename(filename: &str, format: TransferFormat) -> Result<String> {
    transfer_pattern(format)
        .captures(filename)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
        .ok_or_else(|| ValidationError::NotBookcaseFile(filename.to_string()).into())
}

/// The per-user folder holding collections, exports and settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDirectory {
    root: PathBuf,
}

impl Default for DataDirectory {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

impl DataDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the folder if it does not exist yet
    pub fn setup(&self) -> Result<()> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                BookcaseError::FileIoError(format!(
                    "Failed to create data directory {}: {}",
                    self.root.display(),
                    e
                ))
            })?;
            tracing::info!(path = %self.root.display(), "created data directory");
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    /// File of the collection `name`
    pub fn collection_path(&self, name: &str) -> Result<PathBuf> {
        collection::collection_path(&self.root, name)
    }

    /// Default location of an exported table
    pub fn transfer_path(&self, name: &str, format: TransferFormat) -> PathBuf {
        self.root.join(transfer_filename(name, format))
    }

    /// Names of every collection in the folder, sorted
    pub fn collections(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .files_with_extension(COLLECTION_EXTENSION)?
            .into_iter()
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        Ok(names)
    }

    /// Every file of the given transfer format in the folder, sorted
    ///
    /// Files not following the naming convention are listed too; check them
    /// with [`validate_transfer_filename`] before importing.
    pub fn transfer_files(&self, format: TransferFormat) -> Result<Vec<PathBuf>> {
        let mut files = self.files_with_extension(format.extension())?;
        files.sort();
        Ok(files)
    }

    fn files_with_extension(&self, extension: &str) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension) {
                files.push(path);
            }
        }
        Ok(files)
    }
}
