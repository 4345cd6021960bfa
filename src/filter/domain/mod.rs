//! Domain model for task filters, filter presets and sort settings.

mod error;
mod filter;
mod ids;
mod operator;

pub use error::{ParseFilterOperatorError, ParseSortDirectionError};
pub use filter::{
    FilterPreset, FilterUpdate, FilterValue, NewFilter, SortDirection, SortSpec, TaskFilter,
};
pub use ids::{FilterId, PresetId};
pub use operator::{FilterOperator, operators_for};
