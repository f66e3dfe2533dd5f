//! Local persistence: two whole JSON documents under fixed keys.
//!
//! Every mutation rewrites its document synchronously. There is no versioning
//! and no transaction spanning both documents.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::AppError;

pub mod history_store;
pub mod profile_store;

pub use history_store::HistoryStore;
pub use profile_store::ProfileStore;

pub const PROFILE_KEY: &str = "qa_outreach_profile";
pub const HISTORY_KEY: &str = "qa_outreach_history";

/// A key/value document store. Keys are fixed identifiers, values are JSON text.
pub trait Storage: Send + Sync {
    /// Returns `None` when nothing has been stored under `key` yet.
    fn read(&self, key: &str) -> Result<Option<String>, AppError>;
    fn write(&self, key: &str, contents: &str) -> Result<(), AppError>;
}

/// One `<key>.json` file per key inside a data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes to a temp file in the same directory, then renames over the target.
    fn write(&self, key: &str, contents: &str) -> Result<(), AppError> {
        let path = self.path_for(key);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!("Persisted {} ({} bytes)", path.display(), contents.len());
        Ok(())
    }
}

/// In-memory storage for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
    docs: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn with(key: &str, contents: &str) -> Self {
        let storage = Self::default();
        storage
            .docs
            .lock()
            .unwrap()
            .insert(key.to_string(), contents.to_string());
        storage
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.docs.lock().unwrap().get(key).cloned()
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), AppError> {
        self.docs
            .lock()
            .unwrap()
            .insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

/// Reads and decodes the document under `key`. A stored document that does not
/// decode is reported as corrupt rather than replaced.
pub(crate) fn load_document<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, AppError> {
    let Some(text) = storage.read(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| AppError::CorruptDocument {
            key: key.to_string(),
            source,
        })
}

pub(crate) fn save_document<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)?;
    storage.write(key, &text)
}
