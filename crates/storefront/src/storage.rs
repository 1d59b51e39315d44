//! Local device storage.
//!
//! One JSON document per fixed key, written under a single directory.
//! There is no schema version field: if a persisted document no longer
//! matches the expected shape, [`Storage::load`] discards it silently so
//! the owning store starts fresh.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a document failed.
    #[error("storage encoding error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key/value JSON storage over a directory.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Create storage rooted at `dir`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory documents are written under.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load the document stored under `key`.
    ///
    /// Returns `Ok(None)` when no document exists or when the persisted
    /// document no longer deserializes into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding persisted document with stale shape");
                Ok(None)
            }
        }
    }

    /// Write `value` under `key`, replacing any previous document.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the value
    /// cannot be encoded, or the file cannot be written.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_string_pretty(value)?;
        std::fs::write(self.path_for(key), text)?;
        Ok(())
    }

    /// Delete the document stored under `key`. Missing documents are fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a document currently exists under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }
}
