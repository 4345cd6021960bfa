//! Live filters, presets and sort settings.

use super::{FilterId, FilterOperator, ParseSortDirectionError, PresetId};
use crate::task::domain::{AttributeType, parse_instant, parse_number};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal a filter compares attribute values against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Boolean literal.
    Bool(bool),
    /// Numeric literal.
    Number(f64),
    /// Text literal, also used for dates.
    Text(String),
}

impl FilterValue {
    /// Reads a literal from user input. `true` and `false` become booleans;
    /// everything else is kept verbatim as text and coerced per operator.
    #[must_use]
    pub fn infer(raw: &str) -> Self {
        match raw.trim() {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => Self::Text(raw.to_owned()),
        }
    }

    /// Returns the literal's textual representation.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Bool(flag) => flag.to_string(),
            Self::Number(number) => crate::task::domain::ComparableValue::Number(*number).to_text(),
            Self::Text(text) => text.clone(),
        }
    }

    /// Coerces the literal to a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => parse_number(text),
            Self::Bool(_) => None,
        }
    }

    /// Coerces the literal to a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            Self::Text(text) => text.trim().to_ascii_lowercase().parse().ok(),
            Self::Number(_) => None,
        }
    }

    /// Coerces the literal to an instant.
    #[must_use]
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Text(text) => parse_instant(text),
            Self::Bool(_) | Self::Number(_) => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Predicate over one named task attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Filter identifier.
    pub id: FilterId,
    /// Name of the attribute the filter reads.
    pub property_name: String,
    /// Declared attribute type, used to validate the operator.
    pub property_type: AttributeType,
    /// Comparison applied to the attribute.
    pub operator: FilterOperator,
    /// Literal compared against, absent for emptiness operators.
    #[serde(default)]
    pub value: Option<FilterValue>,
    /// Inactive filters are skipped entirely.
    pub is_active: bool,
}

/// Request payload for adding a filter to the live set.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFilter {
    property_name: String,
    property_type: AttributeType,
    operator: FilterOperator,
    value: Option<FilterValue>,
    is_active: bool,
}

impl NewFilter {
    /// Creates an active filter without a literal.
    #[must_use]
    pub fn new(
        property_name: impl Into<String>,
        property_type: AttributeType,
        operator: FilterOperator,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            property_type,
            operator,
            value: None,
            is_active: true,
        }
    }

    /// Sets the literal.
    #[must_use]
    pub fn with_value(mut self, value: FilterValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets whether the filter starts active.
    #[must_use]
    pub const fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Returns the operator.
    #[must_use]
    pub const fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// Returns the declared attribute type.
    #[must_use]
    pub const fn property_type(&self) -> AttributeType {
        self.property_type
    }

    /// Builds the filter under a fresh identifier.
    #[must_use]
    pub fn into_filter(self) -> TaskFilter {
        TaskFilter {
            id: FilterId::new(),
            property_name: self.property_name,
            property_type: self.property_type,
            operator: self.operator,
            value: self.value,
            is_active: self.is_active,
        }
    }
}

/// Partial update of a live filter. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    property_name: Option<String>,
    property_type: Option<AttributeType>,
    operator: Option<FilterOperator>,
    value: Option<Option<FilterValue>>,
    is_active: Option<bool>,
}

impl FilterUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Retargets the filter at another attribute.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, kind: AttributeType) -> Self {
        self.property_name = Some(name.into());
        self.property_type = Some(kind);
        self
    }

    /// Changes the operator.
    #[must_use]
    pub const fn operator(mut self, operator: FilterOperator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Replaces the literal; `None` clears it.
    #[must_use]
    pub fn value(mut self, value: Option<FilterValue>) -> Self {
        self.value = Some(value);
        self
    }

    /// Changes the active flag.
    #[must_use]
    pub const fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Returns the filter as it would look after the update.
    #[must_use]
    pub fn applied_to(&self, filter: &TaskFilter) -> TaskFilter {
        TaskFilter {
            id: filter.id,
            property_name: self
                .property_name
                .clone()
                .unwrap_or_else(|| filter.property_name.clone()),
            property_type: self.property_type.unwrap_or(filter.property_type),
            operator: self.operator.unwrap_or(filter.operator),
            value: self.value.clone().unwrap_or_else(|| filter.value.clone()),
            is_active: self.is_active.unwrap_or(filter.is_active),
        }
    }
}

/// Named snapshot of a filter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPreset {
    id: PresetId,
    name: String,
    filters: Vec<TaskFilter>,
    #[serde(default)]
    is_default: bool,
}

impl FilterPreset {
    /// Captures `filters` under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, filters: Vec<TaskFilter>) -> Self {
        Self {
            id: PresetId::new(),
            name: name.into(),
            filters,
            is_default: false,
        }
    }

    /// Returns the preset identifier.
    #[must_use]
    pub const fn id(&self) -> PresetId {
        self.id
    }

    /// Returns the preset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the captured filters.
    #[must_use]
    pub fn filters(&self) -> &[TaskFilter] {
        &self.filters
    }

    /// Returns `true` for a preset shipped as a default.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending, nulls first.
    #[default]
    Asc,
    /// Descending, nulls last.
    Desc,
}

impl SortDirection {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl TryFrom<&str> for SortDirection {
    type Error = ParseSortDirectionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSortDirectionError(value.to_owned())),
        }
    }
}

/// Attribute and direction to order the visible tasks by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Attribute name.
    pub property: String,
    /// Direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    /// Creates a sort specification.
    #[must_use]
    pub fn new(property: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }
}
