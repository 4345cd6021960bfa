//! Tests for the task registry's ordering and load status.

use std::sync::Arc;

use crate::storage::{adapters::InMemoryStore, ports::KeyValueStore};
use crate::task::{
    adapters::InMemoryTaskSource,
    domain::{Task, TaskId},
    ports::{Credentials, TaskSourceError},
    services::{LoadState, TASK_ORDER_KEY, TaskRegistry},
};
use rstest::{fixture, rstest};

#[fixture]
fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

fn tasks(ids: &[&str]) -> Vec<Task> {
    ids.iter().map(|id| Task::new(*id, format!("Task {id}"))).collect()
}

fn ids<S: KeyValueStore>(registry: &TaskRegistry<S>) -> Vec<&str> {
    registry.tasks().iter().map(|task| task.id().as_str()).collect()
}

fn saved(store: &InMemoryStore) -> eyre::Result<Vec<String>> {
    let raw = store
        .get(TASK_ORDER_KEY)?
        .ok_or_else(|| eyre::eyre!("no saved order"))?;
    Ok(serde_json::from_str(&raw)?)
}

#[rstest]
fn saved_order_is_applied_to_fresh_fetch(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    let mut registry = TaskRegistry::new(Arc::clone(&store));
    registry.set_tasks(tasks(&["A", "B"]));
    registry.reorder(&[TaskId::from("B"), TaskId::from("A")]);

    let mut reloaded = TaskRegistry::new(Arc::clone(&store));
    reloaded.set_tasks(tasks(&["A", "B", "C"]));

    eyre::ensure!(ids(&reloaded) == ["B", "A", "C"]);
    eyre::ensure!(saved(&store)? == ["B", "A", "C"]);
    Ok(())
}

#[rstest]
fn vanished_ids_are_dropped_from_saved_order(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    store.set(TASK_ORDER_KEY, r#"["C","gone","A"]"#)?;
    let mut registry = TaskRegistry::new(Arc::clone(&store));
    registry.set_tasks(tasks(&["A", "B", "C"]));

    eyre::ensure!(ids(&registry) == ["C", "A", "B"]);
    eyre::ensure!(saved(&store)? == ["C", "A", "B"]);
    Ok(())
}

#[rstest]
fn without_saved_order_source_order_is_kept(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    let mut registry = TaskRegistry::new(Arc::clone(&store));
    registry.set_tasks(tasks(&["C", "A", "B"]));

    eyre::ensure!(ids(&registry) == ["C", "A", "B"]);
    eyre::ensure!(store.get(TASK_ORDER_KEY)?.is_none());
    Ok(())
}

#[rstest]
fn corrupt_saved_order_is_ignored() {
    let corrupt = Arc::new(InMemoryStore::with_entry(TASK_ORDER_KEY, "{not json"));
    let mut registry = TaskRegistry::new(corrupt);
    registry.set_tasks(tasks(&["A", "B"]));
    assert_eq!(ids(&registry), ["A", "B"]);
}

#[rstest]
fn reorder_ignores_unknown_ids_and_keeps_the_rest(store: Arc<InMemoryStore>) {
    let mut registry = TaskRegistry::new(store);
    registry.set_tasks(tasks(&["A", "B", "C", "D"]));
    registry.reorder(&[TaskId::from("C"), TaskId::from("X"), TaskId::from("A")]);
    assert_eq!(ids(&registry), ["C", "A", "B", "D"]);
}

#[rstest]
fn clear_tasks_forgets_saved_order(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    let mut registry = TaskRegistry::new(Arc::clone(&store));
    registry.set_tasks(tasks(&["A", "B"]));
    registry.reorder(&[TaskId::from("B")]);
    registry.clear_tasks();

    eyre::ensure!(registry.is_empty());
    eyre::ensure!(store.get(TASK_ORDER_KEY)?.is_none());
    Ok(())
}

#[rstest]
fn add_remove_and_replace_tasks(store: Arc<InMemoryStore>) {
    let mut registry = TaskRegistry::new(store);
    registry.add_task(Task::new("A", "first"));
    registry.add_task(Task::new("B", "second"));
    registry.add_task(Task::new("A", "renamed"));

    assert_eq!(ids(&registry), ["A", "B"]);
    assert_eq!(
        registry.task(&TaskId::from("A")).map(Task::title),
        Some("renamed")
    );
    assert!(!registry.replace_task(Task::new("Z", "missing")));
    assert!(registry.remove_task(&TaskId::from("A")).is_some());
    assert_eq!(registry.len(), 1);
}

#[rstest]
fn load_state_transitions(store: Arc<InMemoryStore>) {
    let mut registry = TaskRegistry::new(store);
    registry.set_loading(true);
    assert!(registry.is_loading());

    registry.set_error("offline");
    assert_eq!(registry.error_message(), Some("offline"));
    assert!(!registry.is_loading());

    registry.set_loading(true);
    assert_eq!(registry.error_message(), None);

    registry.set_tasks(Vec::new());
    assert_eq!(registry.load_state(), &LoadState::Loaded);
}

#[rstest]
#[tokio::test]
async fn refresh_installs_tasks_or_records_failure(store: Arc<InMemoryStore>) {
    let source = InMemoryTaskSource::new(tasks(&["A", "B"]));
    let credentials = Credentials::new("secret", "db");
    let mut registry = TaskRegistry::new(store);

    registry
        .refresh(&source, &credentials)
        .await
        .expect("refresh should succeed");
    assert_eq!(ids(&registry), ["A", "B"]);

    source.set_failure(Some(TaskSourceError::Unauthorized));
    let result = registry.refresh(&source, &credentials).await;
    assert_eq!(result, Err(TaskSourceError::Unauthorized));
    assert_eq!(
        registry.error_message(),
        Some("task source rejected the credentials")
    );
    assert_eq!(ids(&registry), ["A", "B"]);
}
