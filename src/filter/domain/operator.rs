//! Filter operators and the operators applicable to each attribute type.

use super::ParseFilterOperatorError;
use crate::task::domain::AttributeType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicate applied to an attribute's comparable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// Value equals the literal.
    Equals,
    /// Value differs from the literal.
    NotEquals,
    /// Text contains the literal.
    Contains,
    /// Text does not contain the literal.
    NotContains,
    /// Text starts with the literal.
    StartsWith,
    /// Text ends with the literal.
    EndsWith,
    /// Attribute payload is absent.
    IsEmpty,
    /// Attribute payload is present.
    IsNotEmpty,
    /// Number is greater than the literal.
    GreaterThan,
    /// Number is less than the literal.
    LessThan,
    /// Number is greater than or equal to the literal.
    GreaterThanOrEqual,
    /// Number is less than or equal to the literal.
    LessThanOrEqual,
    /// Date is strictly before the literal.
    Before,
    /// Date is strictly after the literal.
    After,
    /// Date is before or at the literal.
    OnOrBefore,
    /// Date is after or at the literal.
    OnOrAfter,
}

const TEXT_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Contains,
    FilterOperator::NotContains,
    FilterOperator::StartsWith,
    FilterOperator::EndsWith,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

const NUMBER_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Equals,
    FilterOperator::NotEquals,
    FilterOperator::GreaterThan,
    FilterOperator::LessThan,
    FilterOperator::GreaterThanOrEqual,
    FilterOperator::LessThanOrEqual,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

const OPTION_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Equals,
    FilterOperator::NotEquals,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

const LIST_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Contains,
    FilterOperator::NotContains,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

const DATE_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Equals,
    FilterOperator::Before,
    FilterOperator::After,
    FilterOperator::OnOrBefore,
    FilterOperator::OnOrAfter,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

const CHECKBOX_OPERATORS: &[FilterOperator] = &[FilterOperator::Equals, FilterOperator::NotEquals];

/// Returns the operators a filter on `kind` may use.
#[must_use]
pub const fn operators_for(kind: AttributeType) -> &'static [FilterOperator] {
    match kind {
        AttributeType::Title
        | AttributeType::RichText
        | AttributeType::Url
        | AttributeType::Email
        | AttributeType::PhoneNumber => TEXT_OPERATORS,
        AttributeType::Number => NUMBER_OPERATORS,
        AttributeType::Select | AttributeType::Status => OPTION_OPERATORS,
        AttributeType::MultiSelect | AttributeType::People => LIST_OPERATORS,
        AttributeType::Date => DATE_OPERATORS,
        AttributeType::Checkbox => CHECKBOX_OPERATORS,
    }
}

impl FilterOperator {
    /// Every operator, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Equals,
        Self::NotEquals,
        Self::Contains,
        Self::NotContains,
        Self::StartsWith,
        Self::EndsWith,
        Self::IsEmpty,
        Self::IsNotEmpty,
        Self::GreaterThan,
        Self::LessThan,
        Self::GreaterThanOrEqual,
        Self::LessThanOrEqual,
        Self::Before,
        Self::After,
        Self::OnOrBefore,
        Self::OnOrAfter,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::IsEmpty => "is_empty",
            Self::IsNotEmpty => "is_not_empty",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::GreaterThanOrEqual => "greater_than_or_equal",
            Self::LessThanOrEqual => "less_than_or_equal",
            Self::Before => "before",
            Self::After => "after",
            Self::OnOrBefore => "on_or_before",
            Self::OnOrAfter => "on_or_after",
        }
    }

    /// Returns `true` when the operator compares against a literal.
    #[must_use]
    pub const fn needs_value(self) -> bool {
        !matches!(self, Self::IsEmpty | Self::IsNotEmpty)
    }

    /// Returns `true` when the operator may be used on `kind`.
    #[must_use]
    pub fn applies_to(self, kind: AttributeType) -> bool {
        operators_for(kind).contains(&self)
    }
}

impl TryFrom<&str> for FilterOperator {
    type Error = ParseFilterOperatorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|operator| operator.as_str() == normalized)
            .ok_or_else(|| ParseFilterOperatorError(value.to_owned()))
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
