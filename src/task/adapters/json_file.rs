//! Task source backed by exported JSON files.
//!
//! Each database is a file named `<database_id>.json` inside the export
//! directory, holding a JSON array of tasks.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::ErrorKind;

use crate::task::{
    domain::Task,
    ports::{Credentials, TaskSource, TaskSourceError, TaskSourceResult},
};

/// Task source reading database exports from a directory.
#[derive(Debug, Clone)]
pub struct JsonFileTaskSource {
    export_dir: Utf8PathBuf,
}

impl JsonFileTaskSource {
    /// Creates a source reading from `export_dir`.
    #[must_use]
    pub fn new(export_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    /// Returns the export directory.
    #[must_use]
    pub fn export_dir(&self) -> &Utf8Path {
        &self.export_dir
    }

    fn export_path(&self, database_id: &str) -> TaskSourceResult<Utf8PathBuf> {
        let id = database_id.trim();
        let safe = !id.is_empty()
            && id
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'));
        if !safe {
            return Err(TaskSourceError::NotFound(database_id.to_owned()));
        }
        Ok(self.export_dir.join(format!("{id}.json")))
    }
}

#[async_trait]
impl TaskSource for JsonFileTaskSource {
    async fn fetch_tasks(&self, credentials: &Credentials) -> TaskSourceResult<Vec<Task>> {
        if !credentials.is_configured() {
            return Err(TaskSourceError::NotConfigured);
        }
        let path = self.export_path(&credentials.database_id)?;
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => TaskSourceError::NotFound(credentials.database_id.clone()),
                ErrorKind::PermissionDenied => TaskSourceError::Unauthorized,
                _ => TaskSourceError::Transport(format!("{path}: {err}")),
            })?;
        serde_json::from_str(&contents)
            .map_err(|err| TaskSourceError::Malformed(format!("{path}: {err}")))
    }

    async fn test_connection(&self, credentials: &Credentials) -> bool {
        match self.fetch_tasks(credentials).await {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %err, "task source connection test failed");
                false
            }
        }
    }
}
