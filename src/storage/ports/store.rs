//! Key-value store port.

use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable string-keyed store with string values.
///
/// Writes are synchronous and best effort. Implementations must make a
/// single `set` visible atomically so that a snapshot is never half written.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be read.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the key is invalid or the write fails.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes the value stored under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be modified.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Errors returned by key-value store adapters.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The key contains characters the backend cannot represent.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend read or write failure.
    #[error("storage backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}

/// Checks that a key is non-empty and limited to `[A-Za-z0-9._-]`.
///
/// # Errors
///
/// Returns [`StoreError::InvalidKey`] for any other key.
pub fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_owned()))
    }
}
