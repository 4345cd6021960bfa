//! In-memory key-value store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::storage::ports::{KeyValueStore, StoreError, StoreResult, validate_key};

/// Thread-safe in-memory key-value store.
///
/// Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a single entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }
}

fn poisoned(err: &impl std::fmt::Display) -> StoreError {
    StoreError::backend(std::io::Error::other(err.to_string()))
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().map_err(|err| poisoned(&err))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(|err| poisoned(&err))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|err| poisoned(&err))?;
        entries.remove(key);
        Ok(())
    }
}
