//! Task registry: the fetched task list, its user-chosen order and the load
//! status.

use std::collections::HashSet;
use std::sync::Arc;

use crate::storage::ports::KeyValueStore;
use crate::task::{
    domain::{Task, TaskId},
    ports::{Credentials, TaskSource, TaskSourceError},
};

/// Storage key for the saved task order.
pub const TASK_ORDER_KEY: &str = "tasks-order";

/// Load status of the task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed with the given message.
    Failed(String),
}

/// Holds the fetched tasks in display order.
///
/// The order the user last chose is persisted as a flat list of task
/// identifiers and re-applied to every fetched list.
pub struct TaskRegistry<S>
where
    S: KeyValueStore,
{
    store: Arc<S>,
    tasks: Vec<Task>,
    load_state: LoadState,
}

impl<S> TaskRegistry<S>
where
    S: KeyValueStore,
{
    /// Creates an empty registry persisting its order in `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            load_state: LoadState::Idle,
        }
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when no tasks are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the load status.
    #[must_use]
    pub const fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Returns `true` while a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading)
    }

    /// Returns the message of the last failed fetch, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.load_state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Replaces the task list with a fresh fetch.
    ///
    /// Tasks named in the saved order come first, in that order; tasks not
    /// seen before follow in source order. Identifiers that disappeared are
    /// dropped from the saved order.
    pub fn set_tasks(&mut self, fetched: Vec<Task>) {
        self.tasks = self.apply_saved_order(fetched);
        self.load_state = LoadState::Loaded;
    }

    /// Rearranges tasks to follow `order`.
    ///
    /// Unknown identifiers are ignored; tasks missing from `order` keep their
    /// relative order after the named ones. The result is persisted.
    pub fn reorder(&mut self, order: &[TaskId]) {
        let current = std::mem::take(&mut self.tasks);
        self.tasks = arrange(current, order);
        self.save_order();
    }

    /// Appends a task, replacing any task with the same identifier in place.
    pub fn add_task(&mut self, task: Task) {
        if !self.replace_task(task.clone()) {
            self.tasks.push(task);
        }
    }

    /// Removes a task, returning it when present.
    pub fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id() == id)?;
        Some(self.tasks.remove(index))
    }

    /// Replaces the task with the same identifier. Returns `false` when no
    /// such task exists.
    pub fn replace_task(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|existing| existing.id() == task.id()) {
            Some(existing) => {
                *existing = task;
                true
            }
            None => false,
        }
    }

    /// Marks a fetch as started or abandoned. Starting clears any error.
    pub fn set_loading(&mut self, loading: bool) {
        if loading {
            self.load_state = LoadState::Loading;
        } else if self.is_loading() {
            self.load_state = LoadState::Idle;
        }
    }

    /// Records a failed fetch.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.load_state = LoadState::Failed(message.into());
    }

    /// Clears a recorded failure.
    pub fn clear_error(&mut self) {
        if self.error_message().is_some() {
            self.load_state = LoadState::Idle;
        }
    }

    /// Drops every task and forgets the saved order.
    pub fn clear_tasks(&mut self) {
        self.tasks.clear();
        if let Err(err) = self.store.remove(TASK_ORDER_KEY) {
            tracing::warn!(error = %err, "failed to clear saved task order");
        }
    }

    /// Fetches tasks from `source` and installs them.
    ///
    /// The failure is also recorded in the load state so that callers which
    /// only render state need not handle the error.
    ///
    /// # Errors
    ///
    /// Returns the [`TaskSourceError`] reported by the source.
    pub async fn refresh<T>(
        &mut self,
        source: &T,
        credentials: &Credentials,
    ) -> Result<(), TaskSourceError>
    where
        T: TaskSource + ?Sized,
    {
        self.set_loading(true);
        match source.fetch_tasks(credentials).await {
            Ok(fetched) => {
                tracing::debug!(count = fetched.len(), "fetched tasks");
                self.set_tasks(fetched);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch tasks");
                self.set_error(err.to_string());
                Err(err)
            }
        }
    }

    fn saved_order(&self) -> Vec<TaskId> {
        let raw = match self.store.get(TASK_ORDER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read saved task order");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding corrupt saved task order");
            Vec::new()
        })
    }

    fn save_order(&self) {
        write_order(self.store.as_ref(), &self.tasks);
    }

    fn apply_saved_order(&self, fetched: Vec<Task>) -> Vec<Task> {
        let saved = self.saved_order();
        if saved.is_empty() {
            return fetched;
        }
        let ordered = arrange(fetched, &saved);
        let reconciled = ordered.iter().map(Task::id).eq(saved.iter());
        if !reconciled {
            write_order(self.store.as_ref(), &ordered);
        }
        ordered
    }
}

fn write_order(store: &impl KeyValueStore, tasks: &[Task]) {
    let ids: Vec<&TaskId> = tasks.iter().map(Task::id).collect();
    let result = serde_json::to_string(&ids)
        .map_err(|err| err.to_string())
        .and_then(|json| {
            store
                .set(TASK_ORDER_KEY, &json)
                .map_err(|err| err.to_string())
        });
    if let Err(err) = result {
        tracing::warn!(error = %err, "failed to save task order");
    }
}

/// Places tasks named in `order` first, then the rest in their original order.
fn arrange(tasks: Vec<Task>, order: &[TaskId]) -> Vec<Task> {
    let mut remaining: Vec<Option<Task>> = tasks.into_iter().map(Some).collect();
    let mut arranged = Vec::with_capacity(remaining.len());
    let mut seen = HashSet::new();
    for id in order {
        if !seen.insert(id) {
            continue;
        }
        if let Some(task) = remaining
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|task| task.id() == id))
            .and_then(Option::take)
        {
            arranged.push(task);
        }
    }
    arranged.extend(remaining.into_iter().flatten());
    arranged
}
