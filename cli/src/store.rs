//! JSON-file key-value store standing in for the browser's localStorage.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use authgate::state::storage::{KeyValueStore, MemoryStore, StoreError};

/// Entries live in memory and are flushed to `path` after every write. A
/// write only lands in memory once the file holds it.
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Open `path`, starting empty if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not a JSON object
    /// of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, crate::CliError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<BTreeMap<String, String>>(&raw)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(crate::CliError::Io { path, source: e }),
        };
        Ok(Self { path, inner: MemoryStore::from_entries(entries) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Encode { key: key.to_owned(), reason: e.to_string() })?;
        std::fs::write(&self.path, body).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "state write failed");
            StoreError::rejected(key, e.to_string())
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.inner.entries();
        entries.insert(key.to_owned(), value.to_owned());
        self.flush(key, &entries)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.inner.entries();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush(key, &entries)?;
        self.inner.remove(key)
    }
}
