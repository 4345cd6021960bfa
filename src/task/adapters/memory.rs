//! In-memory task source for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::Task,
    ports::{Credentials, TaskSource, TaskSourceError, TaskSourceResult},
};

/// Task source serving a fixed task list.
///
/// Clones share state, so a test can swap the served list or inject a
/// failure after handing the source to a registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskSource {
    state: Arc<RwLock<InMemorySourceState>>,
}

#[derive(Debug, Default)]
struct InMemorySourceState {
    tasks: Vec<Task>,
    failure: Option<TaskSourceError>,
}

impl InMemoryTaskSource {
    /// Creates a source serving `tasks`.
    #[must_use]
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemorySourceState {
                tasks,
                failure: None,
            })),
        }
    }

    /// Replaces the served task list.
    pub fn set_tasks(&self, tasks: Vec<Task>) {
        if let Ok(mut state) = self.state.write() {
            state.tasks = tasks;
        }
    }

    /// Makes every subsequent fetch fail with `failure`, or succeed again
    /// when `None`.
    pub fn set_failure(&self, failure: Option<TaskSourceError>) {
        if let Ok(mut state) = self.state.write() {
            state.failure = failure;
        }
    }
}

#[async_trait]
impl TaskSource for InMemoryTaskSource {
    async fn fetch_tasks(&self, credentials: &Credentials) -> TaskSourceResult<Vec<Task>> {
        if !credentials.is_configured() {
            return Err(TaskSourceError::NotConfigured);
        }
        let state = self
            .state
            .read()
            .map_err(|err| TaskSourceError::Transport(err.to_string()))?;
        state
            .failure
            .clone()
            .map_or_else(|| Ok(state.tasks.clone()), Err)
    }

    async fn test_connection(&self, credentials: &Credentials) -> bool {
        self.fetch_tasks(credentials).await.is_ok()
    }
}
