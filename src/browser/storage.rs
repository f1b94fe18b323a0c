//! `localStorage` and `window.location` adapters.

use crate::state::route::{NavigationError, Navigator};
use crate::state::storage::{KeyValueStore, StoreError};

/// [`KeyValueStore`] over `window.localStorage`.
///
/// Quota and privacy-mode failures surface as [`StoreError::Rejected`].
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// The window's local storage, if the browser exposes one.
    pub fn from_window(window: &web_sys::Window) -> Option<Self> {
        let storage = window.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|e| {
            tracing::error!(key, bytes = value.len(), error = ?e, "localStorage write failed");
            StoreError::rejected(key, format!("{e:?}"))
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(|e| {
            tracing::error!(key, error = ?e, "localStorage remove failed");
            StoreError::rejected(key, format!("{e:?}"))
        })
    }
}

/// [`Navigator`] over `window.location`.
pub struct LocationNavigator {
    location: web_sys::Location,
}

impl LocationNavigator {
    pub fn new(window: &web_sys::Window) -> Self {
        Self { location: window.location() }
    }
}

impl Navigator for LocationNavigator {
    fn current_path(&self) -> String {
        self.location.pathname().unwrap_or_default()
    }

    fn assign(&self, path: &str) -> Result<(), NavigationError> {
        self.location
            .set_href(path)
            .map_err(|e| NavigationError { path: path.to_owned(), reason: format!("{e:?}") })
    }
}
