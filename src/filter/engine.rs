//! Pure predicate evaluation and stable ordering over task attributes.
//!
//! A task passes when it satisfies every active filter. Inactive filters are
//! ignored, and a filter on an attribute the task lacks excludes the task
//! whatever the operator. Sorting runs after filtering and is stable, so
//! tasks with equal keys keep their registry order.

use crate::filter::domain::{FilterOperator, FilterValue, SortDirection, SortSpec, TaskFilter};
use crate::task::domain::{ComparableValue, Task, parse_instant};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Returns the tasks passing every active filter, ordered by `sort` when
/// given.
#[must_use]
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    filters: &[TaskFilter],
    sort: Option<&SortSpec>,
) -> Vec<&'a Task> {
    let active: Vec<&TaskFilter> = filters.iter().filter(|filter| filter.is_active).collect();
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| active.iter().all(|filter| matches_filter(task, filter)))
        .collect();

    if let Some(spec) = sort {
        visible.sort_by(|left, right| {
            let ordering = compare_values(
                &sort_key(left, &spec.property),
                &sort_key(right, &spec.property),
            );
            match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
    visible
}

/// Evaluates one filter against one task.
#[must_use]
pub fn matches_filter(task: &Task, filter: &TaskFilter) -> bool {
    let Some(attribute) = task.attribute(&filter.property_name) else {
        return false;
    };
    match filter.operator {
        FilterOperator::IsEmpty => return attribute.value.is_empty(),
        FilterOperator::IsNotEmpty => return !attribute.value.is_empty(),
        _ => {}
    }
    let Some(literal) = filter.value.as_ref() else {
        return false;
    };
    let value = attribute.value.comparable();

    match filter.operator {
        FilterOperator::Equals => values_equal(&value, literal),
        FilterOperator::NotEquals => !values_equal(&value, literal),
        FilterOperator::Contains => text_of(&value).contains(&literal_text(literal)),
        FilterOperator::NotContains => !text_of(&value).contains(&literal_text(literal)),
        FilterOperator::StartsWith => text_of(&value).starts_with(&literal_text(literal)),
        FilterOperator::EndsWith => text_of(&value).ends_with(&literal_text(literal)),
        FilterOperator::GreaterThan => {
            compare_numbers(&value, literal).is_some_and(Ordering::is_gt)
        }
        FilterOperator::LessThan => compare_numbers(&value, literal).is_some_and(Ordering::is_lt),
        FilterOperator::GreaterThanOrEqual => {
            compare_numbers(&value, literal).is_some_and(Ordering::is_ge)
        }
        FilterOperator::LessThanOrEqual => {
            compare_numbers(&value, literal).is_some_and(Ordering::is_le)
        }
        FilterOperator::Before => compare_dates(&value, literal).is_some_and(Ordering::is_lt),
        FilterOperator::After => compare_dates(&value, literal).is_some_and(Ordering::is_gt),
        FilterOperator::OnOrBefore => compare_dates(&value, literal).is_some_and(Ordering::is_le),
        FilterOperator::OnOrAfter => compare_dates(&value, literal).is_some_and(Ordering::is_ge),
        FilterOperator::IsEmpty | FilterOperator::IsNotEmpty => false,
    }
}

/// Orders two comparable values: null first, natives by kind, then the
/// string representations for mixed kinds.
#[must_use]
pub fn compare_values(left: &ComparableValue, right: &ComparableValue) -> Ordering {
    match (left, right) {
        (ComparableValue::Null, ComparableValue::Null) => Ordering::Equal,
        (ComparableValue::Null, _) => Ordering::Less,
        (_, ComparableValue::Null) => Ordering::Greater,
        (ComparableValue::Number(a), ComparableValue::Number(b)) => {
            a.partial_cmp(b).unwrap_or(Ordering::Equal)
        }
        (ComparableValue::Bool(a), ComparableValue::Bool(b)) => a.cmp(b),
        (ComparableValue::Date(a), ComparableValue::Date(b)) => {
            match (parse_instant(a), parse_instant(b)) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => compare_text(a, b),
            }
        }
        (ComparableValue::Text(a), ComparableValue::Text(b)) => compare_text(a, b),
        _ => compare_text(&left.to_text(), &right.to_text()),
    }
}

fn sort_key(task: &Task, property: &str) -> ComparableValue {
    task.attribute(property)
        .map_or(ComparableValue::Null, |attribute| attribute.value.comparable())
}

// Case-insensitive first; lowercase before uppercase on ties.
fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| right.cmp(left))
}

fn text_of(value: &ComparableValue) -> String {
    value.to_text().to_lowercase()
}

fn literal_text(literal: &FilterValue) -> String {
    literal.to_text().to_lowercase()
}

fn values_equal(value: &ComparableValue, literal: &FilterValue) -> bool {
    match value {
        ComparableValue::Null => false,
        ComparableValue::Number(number) => literal
            .as_number()
            .is_some_and(|expected| number.total_cmp(&expected).is_eq()),
        ComparableValue::Bool(flag) => literal.as_bool() == Some(*flag),
        ComparableValue::Date(text) => dates_equal(text, literal),
        ComparableValue::Text(text) => text.to_lowercase() == literal_text(literal),
    }
}

fn dates_equal(value: &str, literal: &FilterValue) -> bool {
    let expected = literal.to_text();
    if let Ok(day) = NaiveDate::parse_from_str(expected.trim(), "%Y-%m-%d") {
        return parse_instant(value).is_some_and(|instant| instant.date_naive() == day);
    }
    match (parse_instant(value), literal.as_instant()) {
        (Some(actual), Some(wanted)) => actual == wanted,
        _ => value.to_lowercase() == expected.to_lowercase(),
    }
}

fn compare_numbers(value: &ComparableValue, literal: &FilterValue) -> Option<Ordering> {
    let actual = value.as_number()?;
    let expected = literal.as_number()?;
    actual.partial_cmp(&expected)
}

fn compare_dates(value: &ComparableValue, literal: &FilterValue) -> Option<Ordering> {
    let actual = value.as_instant()?;
    let expected = literal.as_instant()?;
    Some(actual.cmp(&expected))
}
