//! Application settings
//!
//! Settings live in `config.ini` in the data directory:
//!
//! ```ini
//! [LOCAL]
//! gui_language = en
//! ```
//!
//! A [`Settings`] value is loaded once at startup and handed to whatever
//! needs it. A missing file is created with the defaults; a missing or
//! unknown language falls back to English.

use crate::error::{BookcaseError, Result};
use crate::i18n::Language;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// INI section holding every setting
pub const SETTINGS_SECTION: &str = "LOCAL";

/// Key of the GUI language
pub const LANGUAGE_KEY: &str = "gui_language";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub gui_language: Language,
}

impl Settings {
    /// Read the settings file, writing the defaults first if it is missing
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let settings = Self::default();
            settings.save(path)?;
            tracing::info!(path = %path.display(), "created default settings");
            return Ok(settings);
        }
        Self::load(path)
    }

    /// Read the settings file
    ///
    /// # Errors
    /// `FileNotFound` if the file is missing, `ConfigError` if it is not
    /// valid INI.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BookcaseError::FileNotFound(path.display().to_string()));
        }

        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini))
            .build()?;

        // Section names are matched case-insensitively
        let language = [SETTINGS_SECTION.to_string(), SETTINGS_SECTION.to_lowercase()]
            .iter()
            .find_map(|section| config.get_string(&format!("{}.{}", section, LANGUAGE_KEY)).ok());

        let gui_language = match language {
            Some(code) => code.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "unknown language in settings, using default");
                Language::default()
            }),
            None => Language::default(),
        };

        Ok(Self { gui_language })
    }

    /// Write the settings file, replacing it
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let contents = format!(
            "[{}]\n{} = {}\n\n",
            SETTINGS_SECTION,
            LANGUAGE_KEY,
            self.gui_language.code()
        );
        std::fs::write(path, contents).map_err(|e| {
            BookcaseError::FileIoError(format!(
                "Failed to write settings {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Change the language and write it through to `path`
    pub fn set_language(&mut self, language: Language, path: impl AsRef<Path>) -> Result<()> {
        self.gui_language = language;
        self.save(path)?;
        tracing::info!(language = %language, "changed GUI language");
        Ok(())
    }
}
