//! Filter store: live filters, named presets and the sort setting.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::filter::{
    domain::{
        FilterId, FilterPreset, FilterUpdate, NewFilter, PresetId, SortDirection, SortSpec,
        TaskFilter,
    },
    engine::filter_tasks,
};
use crate::storage::ports::KeyValueStore;
use crate::task::domain::Task;

/// Storage key for the persisted filter state.
pub const FILTERS_KEY: &str = "filters";

/// Everything the filter store persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Live filters in creation order.
    #[serde(default)]
    pub active_filters: Vec<TaskFilter>,
    /// Saved presets in creation order.
    #[serde(default)]
    pub presets: Vec<FilterPreset>,
    /// Current sort, if any.
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

/// Owns the live filter set and writes it through to storage on every
/// change.
///
/// Storage failures never reach callers: a failed read starts from an empty
/// state and a failed write is logged.
pub struct FilterStore<S>
where
    S: KeyValueStore,
{
    store: Arc<S>,
    state: FilterState,
}

impl<S> FilterStore<S>
where
    S: KeyValueStore,
{
    /// Creates a filter store, restoring any persisted state.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        let state = restore(store.as_ref());
        Self { store, state }
    }

    /// Returns the live filters.
    #[must_use]
    pub fn filters(&self) -> &[TaskFilter] {
        &self.state.active_filters
    }

    /// Looks up a live filter.
    #[must_use]
    pub fn filter(&self, id: FilterId) -> Option<&TaskFilter> {
        self.state.active_filters.iter().find(|filter| filter.id == id)
    }

    /// Returns the saved presets.
    #[must_use]
    pub fn presets(&self) -> &[FilterPreset] {
        &self.state.presets
    }

    /// Returns the current sort.
    #[must_use]
    pub const fn sort(&self) -> Option<&SortSpec> {
        self.state.sort.as_ref()
    }

    /// Returns `true` when at least one live filter is active.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }

    /// Counts the active live filters.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.state
            .active_filters
            .iter()
            .filter(|filter| filter.is_active)
            .count()
    }

    /// Adds a filter, returning its identifier.
    ///
    /// Operators that do not apply to the attribute type are rejected and
    /// `None` is returned.
    pub fn add_filter(&mut self, request: NewFilter) -> Option<FilterId> {
        if !request.operator().applies_to(request.property_type()) {
            tracing::warn!(
                operator = %request.operator(),
                property_type = %request.property_type(),
                "rejecting filter operator not applicable to attribute type"
            );
            return None;
        }
        let filter = request.into_filter();
        let id = filter.id;
        self.state.active_filters.push(filter);
        self.persist();
        Some(id)
    }

    /// Applies `update` to a live filter. Returns `false` when the filter is
    /// unknown or the updated operator would not apply.
    pub fn update_filter(&mut self, id: FilterId, update: &FilterUpdate) -> bool {
        let Some(slot) = self
            .state
            .active_filters
            .iter_mut()
            .find(|filter| filter.id == id)
        else {
            return false;
        };
        let updated = update.applied_to(slot);
        if !updated.operator.applies_to(updated.property_type) {
            tracing::warn!(filter_id = %id, operator = %updated.operator, "ignoring filter update");
            return false;
        }
        *slot = updated;
        self.persist();
        true
    }

    /// Removes a live filter. Returns `false` when it was unknown.
    pub fn remove_filter(&mut self, id: FilterId) -> bool {
        let before = self.state.active_filters.len();
        self.state.active_filters.retain(|filter| filter.id != id);
        let removed = self.state.active_filters.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Flips a filter's active flag, returning the new value.
    pub fn toggle_filter(&mut self, id: FilterId) -> Option<bool> {
        let filter = self
            .state
            .active_filters
            .iter_mut()
            .find(|filter| filter.id == id)?;
        filter.is_active = !filter.is_active;
        let is_active = filter.is_active;
        self.persist();
        Some(is_active)
    }

    /// Removes every live filter. Presets are kept.
    pub fn clear_filters(&mut self) {
        self.state.active_filters.clear();
        self.persist();
    }

    /// Sets or clears the sort.
    pub fn set_sorting(&mut self, property: Option<String>, direction: SortDirection) {
        self.state.sort = property
            .filter(|name| !name.trim().is_empty())
            .map(|name| SortSpec::new(name, direction));
        self.persist();
    }

    /// Saves the live filters as a named preset.
    pub fn save_preset(&mut self, name: impl Into<String>) -> PresetId {
        let preset = FilterPreset::new(name, self.state.active_filters.clone());
        let id = preset.id();
        self.state.presets.push(preset);
        self.persist();
        id
    }

    /// Replaces the live filters with copies of a preset's filters under
    /// fresh identifiers. Returns `false` for an unknown preset.
    pub fn load_preset(&mut self, id: PresetId) -> bool {
        let Some(preset) = self.state.presets.iter().find(|preset| preset.id() == id) else {
            return false;
        };
        self.state.active_filters = preset
            .filters()
            .iter()
            .map(|filter| TaskFilter {
                id: FilterId::new(),
                ..filter.clone()
            })
            .collect();
        self.persist();
        true
    }

    /// Deletes a preset. Returns `false` when it was unknown.
    pub fn delete_preset(&mut self, id: PresetId) -> bool {
        let before = self.state.presets.len();
        self.state.presets.retain(|preset| preset.id() != id);
        let removed = self.state.presets.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Filters and sorts `tasks` with the live filters and stored sort.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        filter_tasks(tasks, &self.state.active_filters, self.state.sort.as_ref())
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.state)
            .map_err(|err| err.to_string())
            .and_then(|json| {
                self.store
                    .set(FILTERS_KEY, &json)
                    .map_err(|err| err.to_string())
            });
        if let Err(error) = result {
            tracing::warn!(%error, "failed to persist filter state");
        }
    }
}

fn restore(store: &impl KeyValueStore) -> FilterState {
    let raw = match store.get(FILTERS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return FilterState::default(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read filter state");
            return FilterState::default();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "discarding corrupt filter state");
        FilterState::default()
    })
}
