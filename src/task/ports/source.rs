//! Task-source port for fetching tasks from the remote service.

use crate::task::domain::Task;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for task-source operations.
pub type TaskSourceResult<T> = Result<T, TaskSourceError>;

/// Credentials identifying the remote task database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Integration secret.
    #[serde(default)]
    pub api_key: String,
    /// Identifier of the database holding the tasks.
    #[serde(default)]
    pub database_id: String,
}

impl Credentials {
    /// Creates credentials from their parts.
    #[must_use]
    pub fn new(api_key: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            database_id: database_id.into(),
        }
    }

    /// Returns `true` when both the key and the database are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.database_id.trim().is_empty()
    }
}

/// Remote task source contract.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Fetches every task in the configured database, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSourceError`] when the credentials are incomplete or
    /// rejected, the database is unknown, or the response cannot be read.
    async fn fetch_tasks(&self, credentials: &Credentials) -> TaskSourceResult<Vec<Task>>;

    /// Checks whether the credentials reach the database.
    async fn test_connection(&self, credentials: &Credentials) -> bool;
}

/// Errors returned by task-source adapters.
///
/// Every variant renders a message fit to show to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskSourceError {
    /// Credentials are missing.
    #[error("task source is not configured: set an API key and a database id")]
    NotConfigured,

    /// The service rejected the credentials.
    #[error("task source rejected the credentials")]
    Unauthorized,

    /// The database does not exist or is not shared with the integration.
    #[error("task database not found: {0}")]
    NotFound(String),

    /// Connectivity failure.
    #[error("could not reach the task source: {0}")]
    Transport(String),

    /// The response could not be interpreted as tasks.
    #[error("task source returned malformed data: {0}")]
    Malformed(String),
}
