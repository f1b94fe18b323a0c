//! Persistent key-value storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser this is `localStorage` (see `browser::storage`). Values
//! outlive the session: a profile image stays under its user id after
//! sign-out.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Write failure of a [`KeyValueStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backend refused the write (quota exceeded, storage disabled, I/O).
    #[error("write to {key} rejected: {reason}")]
    Rejected { key: String, reason: String },

    #[error("cannot encode value for {key}: {reason}")]
    Encode { key: String, reason: String },
}

impl StoreError {
    #[must_use]
    pub fn rejected(key: &str, reason: impl Into<String>) -> Self {
        Self::Rejected { key: key.to_owned(), reason: reason.into() }
    }
}

/// String store with `localStorage` semantics. Writes report whether the
/// value was actually persisted.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// [`StoreError::Rejected`] if the backend did not keep the value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// [`StoreError::Rejected`] if the backend could not drop the entry.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Storage key of the profile image for `uid`.
#[must_use]
pub fn profile_image_key(uid: &str) -> String {
    format!("profileImage-{uid}")
}

/// Load a JSON value stored under `key`. Malformed entries read as absent.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding malformed stored value");
            None
        }
    }
}

/// Save `value` as JSON under `key`.
///
/// # Errors
///
/// Fails if `value` does not serialize or the store rejects the write.
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| StoreError::Encode { key: key.to_owned(), reason: e.to_string() })?;
    store.set(key, &raw)
}

/// Map-backed store for tests and native use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from existing entries.
    #[must_use]
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries: RefCell::new(entries) }
    }

    /// Copy of every entry, in key order.
    #[must_use]
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
