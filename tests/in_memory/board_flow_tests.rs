//! In-memory integration tests for ordering, filtering and sorting.

use std::sync::Arc;

use planme::filter::{
    domain::{FilterOperator, FilterValue, NewFilter, SortDirection},
    services::FilterStore,
};
use planme::storage::adapters::InMemoryStore;
use planme::task::{
    adapters::InMemoryTaskSource,
    domain::{Task, TaskId},
    ports::Credentials,
    services::TaskRegistry,
};
use rstest::{fixture, rstest};

use crate::test_helpers::task_with_status;

#[fixture]
fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

fn board() -> Vec<Task> {
    vec![
        task_with_status("1", "Write report", Some("Done")),
        task_with_status("2", "Review budget", Some("Doing")),
        task_with_status("3", "Plan offsite", None),
    ]
}

fn titles(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|task| task.title().to_owned()).collect()
}

#[rstest]
#[tokio::test]
async fn filters_apply_to_registry_order(store: Arc<InMemoryStore>) -> Result<(), eyre::Report> {
    let source = InMemoryTaskSource::new(board());
    let credentials = Credentials::new("key", "board");
    let mut registry = TaskRegistry::new(Arc::clone(&store));
    registry.refresh(&source, &credentials).await?;
    registry.reorder(&[TaskId::from("3"), TaskId::from("1")]);

    let mut filters = FilterStore::new(Arc::clone(&store));
    filters
        .add_filter(
            NewFilter::new(
                "Status",
                planme::task::domain::AttributeType::Status,
                FilterOperator::NotEquals,
            )
            .with_value(FilterValue::Text("doing".to_owned())),
        )
        .ok_or_else(|| eyre::eyre!("filter rejected"))?;

    let visible = filters.apply(registry.tasks());
    eyre::ensure!(titles(&visible) == ["Plan offsite", "Write report"]);

    filters.set_sorting(Some("Name".to_owned()), SortDirection::Asc);
    let sorted = filters.apply(registry.tasks());
    eyre::ensure!(titles(&sorted) == ["Plan offsite", "Write report"]);

    filters.set_sorting(Some("Status".to_owned()), SortDirection::Desc);
    let by_status = filters.apply(registry.tasks());
    eyre::ensure!(titles(&by_status) == ["Write report", "Plan offsite"]);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn new_tasks_append_after_saved_order(store: Arc<InMemoryStore>) -> Result<(), eyre::Report> {
    let source = InMemoryTaskSource::new(board().into_iter().take(2).collect());
    let credentials = Credentials::new("key", "board");

    let mut registry = TaskRegistry::new(Arc::clone(&store));
    registry.refresh(&source, &credentials).await?;
    registry.reorder(&[TaskId::from("2"), TaskId::from("1")]);

    source.set_tasks(board());
    let mut reloaded = TaskRegistry::new(Arc::clone(&store));
    reloaded.refresh(&source, &credentials).await?;

    let ids: Vec<&str> = reloaded.tasks().iter().map(|task| task.id().as_str()).collect();
    eyre::ensure!(ids == ["2", "1", "3"]);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn unconfigured_source_sets_failure_state(
    store: Arc<InMemoryStore>,
) -> Result<(), eyre::Report> {
    let source = InMemoryTaskSource::new(board());
    let mut registry = TaskRegistry::new(store);

    let result = registry.refresh(&source, &Credentials::default()).await;
    eyre::ensure!(result.is_err());
    eyre::ensure!(registry.error_message().is_some());
    eyre::ensure!(registry.is_empty());
    Ok(())
}
