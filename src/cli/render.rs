//! Plain-text rendering of tasks, timers and filters.

use chrono::{DateTime, Utc};

use crate::filter::domain::{FilterPreset, SortSpec, TaskFilter};
use crate::task::domain::{Task, TaskId};
use crate::timer::domain::{ProgressLevel, TaskTimer, format_clock, format_short};

pub(super) fn timer_summary(
    task_id: &TaskId,
    timer: Option<&TaskTimer>,
    now: DateTime<Utc>,
) -> String {
    let Some(timer) = timer else {
        return format!("{task_id}\tidle\t0:00");
    };
    let progress = timer.progress(now);
    let planned = if timer.planned_minutes() > 0.0 {
        format_short(timer.planned_minutes())
    } else {
        "-".to_owned()
    };
    format!(
        "{task_id}\t{status}\t{spent}\t{planned}\t{level}",
        status = timer.status().as_str(),
        spent = format_clock(timer.total_spent(now)),
        level = ProgressLevel::of(progress.as_ref()).as_str(),
    )
}

pub(super) fn task_row(task: &Task, timer: Option<&TaskTimer>, now: DateTime<Utc>) -> String {
    let summary = timer_summary(task.id(), timer, now);
    let timing = summary
        .split_once('\t')
        .map_or(summary.as_str(), |(_, rest)| rest);
    format!("{}\t{}\t{timing}", task.id(), task.title())
}

pub(super) fn filter_row(filter: &TaskFilter) -> String {
    let value = filter
        .value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    format!(
        "{id}\t[{mark}]\t{property} ({kind}) {operator} {value}",
        id = filter.id,
        mark = if filter.is_active { "x" } else { " " },
        property = filter.property_name,
        kind = filter.property_type,
        operator = filter.operator,
    )
    .trim_end()
    .to_owned()
}

pub(super) fn sort_row(sort: Option<&SortSpec>) -> String {
    sort.map_or_else(
        || "sort: none".to_owned(),
        |spec| format!("sort: {} {}", spec.property, spec.direction.as_str()),
    )
}

pub(super) fn preset_row(preset: &FilterPreset) -> String {
    format!(
        "{}\t{}\t{} filter(s)",
        preset.id(),
        preset.name(),
        preset.filters().len()
    )
}
