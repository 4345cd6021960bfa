//! The set of task timers and the single active-timer pointer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TaskTimer, TimeProgress, TimerSession, TimerStatus};
use crate::task::domain::TaskId;

/// All task timers plus the identifier of the one that may be running.
///
/// Operations take an explicit `now` so the ledger stays free of clocks and
/// storage. At most one timer is running, and when one is, it is the active
/// timer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimerLedger {
    active_timer_id: Option<TaskId>,
    timers: BTreeMap<TaskId, TaskTimer>,
}

impl TimerLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a timer.
    #[must_use]
    pub fn timer(&self, task_id: &TaskId) -> Option<&TaskTimer> {
        self.timers.get(task_id)
    }

    /// Iterates over every timer in task identifier order.
    pub fn timers(&self) -> impl Iterator<Item = &TaskTimer> {
        self.timers.values()
    }

    /// Returns the number of timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns `true` when no timers exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Returns the identifier of the running timer.
    #[must_use]
    pub const fn active_timer_id(&self) -> Option<&TaskId> {
        self.active_timer_id.as_ref()
    }

    /// Returns the running timer.
    #[must_use]
    pub fn active_timer(&self) -> Option<&TaskTimer> {
        self.active_timer_id
            .as_ref()
            .and_then(|id| self.timers.get(id))
    }

    /// Returns `true` when `task_id` is the running timer.
    #[must_use]
    pub fn is_active(&self, task_id: &TaskId) -> bool {
        self.active_timer_id.as_ref() == Some(task_id)
    }

    /// Returns `true` when any timer is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active_timer().is_some_and(TaskTimer::is_running)
    }

    /// Returns the coarse status; unknown tasks are idle.
    #[must_use]
    pub fn status(&self, task_id: &TaskId) -> TimerStatus {
        self.timers
            .get(task_id)
            .map_or(TimerStatus::Idle, TaskTimer::status)
    }

    /// Projects a timer's progress at `now` without touching stored state.
    #[must_use]
    pub fn time_progress(&self, task_id: &TaskId, now: DateTime<Utc>) -> Option<TimeProgress> {
        self.timers.get(task_id)?.progress(now)
    }

    /// Sets a timer's budget, creating the timer if needed. Returns the
    /// stored, clamped budget.
    pub fn set_planned_time(&mut self, task_id: &TaskId, minutes: f64, now: DateTime<Utc>) -> f64 {
        self.entry(task_id).plan(minutes, now)
    }

    /// Starts a timer, first stopping any other running timer. Returns
    /// `false` when the timer was already running.
    pub fn start(&mut self, task_id: &TaskId, now: DateTime<Utc>) -> bool {
        if let Some(current) = self.active_timer_id.clone()
            && current != *task_id
        {
            self.stop(&current, now);
        }
        let opened = self.entry(task_id).open(now);
        self.active_timer_id = Some(task_id.clone());
        opened
    }

    /// Stops a running timer, returning the session it closed.
    pub fn stop(&mut self, task_id: &TaskId, now: DateTime<Utc>) -> Option<TimerSession> {
        let session = self.timers.get_mut(task_id)?.close(now)?;
        if self.is_active(task_id) {
            self.active_timer_id = None;
        }
        Some(session)
    }

    /// Same transition as [`TimerLedger::stop`].
    pub fn pause(&mut self, task_id: &TaskId, now: DateTime<Utc>) -> Option<TimerSession> {
        self.stop(task_id, now)
    }

    /// Stops a timer if running, then clears its spent time and sessions.
    /// Returns `false` for an unknown task.
    pub fn reset(&mut self, task_id: &TaskId, now: DateTime<Utc>) -> bool {
        self.stop(task_id, now);
        let Some(timer) = self.timers.get_mut(task_id) else {
            return false;
        };
        timer.clear();
        true
    }

    /// Stops a timer if running, then removes it. Returns `false` for an
    /// unknown task.
    pub fn delete(&mut self, task_id: &TaskId, now: DateTime<Utc>) -> bool {
        self.stop(task_id, now);
        self.timers.remove(task_id).is_some()
    }

    /// Removes every timer.
    pub fn clear_all(&mut self) {
        self.active_timer_id = None;
        self.timers.clear();
    }

    /// Detects overtime crossings at `now`, returning the tasks that just
    /// crossed their budget.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<TaskId> {
        self.timers
            .values_mut()
            .filter_map(|timer| {
                timer
                    .detect_overtime(now)
                    .then(|| timer.task_id().clone())
            })
            .collect()
    }

    /// Captures the ledger for persistence.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            active_timer_id: self.active_timer_id.clone(),
            timers: self.timers.values().cloned().collect(),
        }
    }

    /// Rebuilds a ledger from a snapshot.
    ///
    /// Timer records that fail [`TaskTimer::validated`] are discarded.
    /// Running timers other than the active one are stopped without
    /// accruing their open session, and an active pointer to a missing or
    /// stopped timer is cleared.
    #[must_use]
    pub fn restore(snapshot: TimerSnapshot) -> Self {
        let mut timers: BTreeMap<TaskId, TaskTimer> = snapshot
            .timers
            .into_iter()
            .filter_map(|timer| {
                let task_id = timer.task_id().clone();
                timer
                    .validated()
                    .inspect_err(|err| {
                        tracing::warn!(%task_id, error = %err, "discarding invalid timer record");
                    })
                    .ok()
            })
            .map(|timer| (timer.task_id().clone(), timer))
            .collect();
        let active_timer_id = snapshot
            .active_timer_id
            .filter(|id| timers.get(id).is_some_and(TaskTimer::is_running));
        for timer in timers.values_mut() {
            if timer.is_running() && active_timer_id.as_ref() != Some(timer.task_id()) {
                tracing::warn!(task_id = %timer.task_id(), "stopping orphaned running timer");
                timer.abandon();
            }
        }
        Self {
            active_timer_id,
            timers,
        }
    }

    fn entry(&mut self, task_id: &TaskId) -> &mut TaskTimer {
        self.timers
            .entry(task_id.clone())
            .or_insert_with(|| TaskTimer::new(task_id.clone()))
    }
}

/// Persisted form of a [`TimerLedger`]: timers flattened to a list ordered by
/// task identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Identifier of the running timer.
    #[serde(default)]
    pub active_timer_id: Option<TaskId>,
    /// Every timer.
    #[serde(default)]
    pub timers: Vec<TaskTimer>,
}

impl TimerSnapshot {
    /// Parses a persisted snapshot, discarding individual timer records that
    /// fail to parse.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the document as a whole is not a
    /// snapshot.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default)]
            active_timer_id: Option<TaskId>,
            #[serde(default)]
            timers: Vec<serde_json::Value>,
        }

        let envelope: Envelope = serde_json::from_str(raw)?;
        let timers = envelope
            .timers
            .into_iter()
            .filter_map(|record| {
                serde_json::from_value::<TaskTimer>(record)
                    .inspect_err(|err| {
                        tracing::warn!(error = %err, "discarding corrupt timer record");
                    })
                    .ok()
            })
            .collect();
        Ok(Self {
            active_timer_id: envelope.active_timer_id,
            timers,
        })
    }
}
