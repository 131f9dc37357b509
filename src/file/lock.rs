//! Single-instance lock
//!
//! Only one process may work on a data directory at a time. The lock is a
//! `.lock` file created exclusively at startup and removed at shutdown; if
//! the file already exists, startup must abort. A crashed process leaves
//! the file behind and it has to be removed by hand.

use crate::error::{BookcaseError, Result};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Lock file name inside the data directory
pub const LOCK_FILE: &str = ".lock";

/// Held lock on a data directory, released on drop
#[derive(Debug)]
pub struct InstanceLock {
    path: PathBuf,
    file: Option<File>,
}

impl InstanceLock {
    /// Create the lock file in `dir`
    ///
    /// # Errors
    /// `InstanceLocked` if the lock file already exists.
    pub fn acquire(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(LOCK_FILE);

        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::warn!(path = %path.display(), "instance lock already held");
                return Err(BookcaseError::InstanceLocked(path.display().to_string()));
            }
            Err(e) => {
                return Err(BookcaseError::FileIoError(format!(
                    "Failed to create lock file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        // From here on Drop removes the file if writing the pid fails
        let mut lock = Self {
            path,
            file: Some(file),
        };
        lock.write_pid()?;

        tracing::debug!(path = %lock.path.display(), "acquired instance lock");
        Ok(lock)
    }

    fn write_pid(&mut self) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            writeln!(file, "{}", std::process::id())?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close and remove the lock file
    pub fn release(mut self) -> Result<()> {
        self.remove()
    }

    fn remove(&mut self) -> Result<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };
        drop(file);

        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tracing::debug!(path = %self.path.display(), "released instance lock");
        Ok(())
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        if let Err(e) = self.remove() {
            tracing::warn!(error = %e, "failed to release instance lock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_second_acquire_conflicts() {
        let temp_dir = TempDir::new().unwrap();
        let lock = InstanceLock::acquire(temp_dir.path()).unwrap();
        assert!(lock.path().exists());

        let err = InstanceLock::acquire(temp_dir.path()).unwrap_err();
        assert!(matches!(err, BookcaseError::InstanceLocked(_)));
        assert!(err.is_file_error());

        lock.release().unwrap();
        assert!(!temp_dir.path().join(LOCK_FILE).exists());
        InstanceLock::acquire(temp_dir.path()).unwrap();
    }

    #[test]
    fn test_lock_file_holds_pid() {
        let temp_dir = TempDir::new().unwrap();
        let lock = InstanceLock::acquire(temp_dir.path()).unwrap();

        let contents = std::fs::read_to_string(lock.path()).unwrap();
        assert_eq!(contents.trim(), std::process::id().to_string());
    }

    #[test]
    fn test_drop_releases() {
        let temp_dir = TempDir::new().unwrap();
        {
            let _lock = InstanceLock::acquire(temp_dir.path()).unwrap();
        }
        assert!(!temp_dir.path().join(LOCK_FILE).exists());
    }
}
