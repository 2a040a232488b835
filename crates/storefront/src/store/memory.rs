//! In-memory profile store for tests and ephemeral profiles.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{ProfileStore, StoreError};

/// A [`ProfileStore`] that lives only as long as the process.
///
/// Useful in tests and for "private browsing" style profiles where nothing
/// should survive a restart.
#[derive(Default)]
pub struct MemoryStore {
    map: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries.
    #[must_use]
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            map: RwLock::new(entries.into_iter().collect()),
        }
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
