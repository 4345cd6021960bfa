//! Timer record, completed sessions and progress projection.

use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound of a planned budget, eight hours.
pub const MAX_PLANNED_MINUTES: f64 = 480.0;

/// Largest drift tolerated between a restored timer's spent minutes and the
/// sum of its sessions.
const SPENT_TOLERANCE_MINUTES: f64 = 1e-6;

fn clamp_planned(minutes: f64) -> f64 {
    if minutes.is_nan() {
        0.0
    } else {
        minutes.clamp(0.0, MAX_PLANNED_MINUTES)
    }
}

/// Fractional minutes between two instants. Negative spans count as zero.
#[must_use]
pub fn elapsed_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from)
        .to_std()
        .map_or(0.0, |span| span.as_secs_f64() / 60.0)
}

/// Whether a timer has an open session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunState {
    /// No session is open.
    #[default]
    Stopped,
    /// A session opened at `started_at` is accruing time.
    Running {
        /// Start of the open session.
        started_at: DateTime<Utc>,
    },
}

/// One completed run of a timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSession {
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    duration_minutes: f64,
}

impl TimerSession {
    /// Closes a session, deriving its duration from the two instants.
    #[must_use]
    pub fn closed(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            ended_at,
            duration_minutes: elapsed_minutes(started_at, ended_at),
        }
    }

    /// Returns when the session started.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns when the session ended.
    #[must_use]
    pub const fn ended_at(&self) -> DateTime<Utc> {
        self.ended_at
    }

    /// Returns the session length in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }
}

/// Coarse state of a task's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    /// No timer, or nothing spent and not running.
    Idle,
    /// A session is open.
    Running,
    /// Stopped with time already spent.
    Paused,
}

impl TimerStatus {
    /// Returns a lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

/// Progress of a budgeted timer at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeProgress {
    /// Minutes spent, including the open session.
    pub spent: f64,
    /// Planned budget in minutes.
    pub planned: f64,
    /// Spent share of the budget, capped at 100.
    pub percentage: f64,
    /// Minutes left before the budget is exhausted, never negative.
    pub remaining: f64,
    /// Spent exceeds the budget.
    pub is_overtime: bool,
}

/// Accrual state for one task.
///
/// `spent_minutes` is the sum of completed sessions; the open session is
/// only counted by projections taking an explicit `now`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskTimer {
    task_id: TaskId,
    #[serde(default)]
    planned_minutes: f64,
    #[serde(default)]
    spent_minutes: f64,
    #[serde(default)]
    run: RunState,
    #[serde(default)]
    sessions: Vec<TimerSession>,
    #[serde(default)]
    overtime_notified: bool,
}

impl TaskTimer {
    /// Creates an idle timer with no budget.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            planned_minutes: 0.0,
            spent_minutes: 0.0,
            run: RunState::Stopped,
            sessions: Vec::new(),
            overtime_notified: false,
        }
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the planned budget in minutes.
    #[must_use]
    pub const fn planned_minutes(&self) -> f64 {
        self.planned_minutes
    }

    /// Returns the minutes of completed sessions.
    #[must_use]
    pub const fn spent_minutes(&self) -> f64 {
        self.spent_minutes
    }

    /// Returns the run state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run
    }

    /// Returns `true` while a session is open.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.run, RunState::Running { .. })
    }

    /// Returns the start of the open session.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        match self.run {
            RunState::Running { started_at } => Some(started_at),
            RunState::Stopped => None,
        }
    }

    /// Returns the completed sessions, oldest first.
    #[must_use]
    pub fn sessions(&self) -> &[TimerSession] {
        &self.sessions
    }

    /// Returns `true` once the current overtime excursion has been reported.
    #[must_use]
    pub const fn overtime_notified(&self) -> bool {
        self.overtime_notified
    }

    /// Total minutes at `now`, counting the open session.
    #[must_use]
    pub fn total_spent(&self, now: DateTime<Utc>) -> f64 {
        self.started_at().map_or(self.spent_minutes, |started_at| {
            self.spent_minutes + elapsed_minutes(started_at, now)
        })
    }

    /// Returns the coarse status.
    #[must_use]
    pub fn status(&self) -> TimerStatus {
        if self.is_running() {
            TimerStatus::Running
        } else if self.spent_minutes > 0.0 {
            TimerStatus::Paused
        } else {
            TimerStatus::Idle
        }
    }

    /// Projects progress at `now`; `None` without a budget.
    #[must_use]
    pub fn progress(&self, now: DateTime<Utc>) -> Option<TimeProgress> {
        if self.planned_minutes <= 0.0 {
            return None;
        }
        let spent = self.total_spent(now);
        Some(TimeProgress {
            spent,
            planned: self.planned_minutes,
            percentage: (spent / self.planned_minutes * 100.0).min(100.0),
            remaining: (self.planned_minutes - spent).max(0.0),
            is_overtime: spent > self.planned_minutes,
        })
    }

    /// Stores a clamped budget and re-arms overtime detection when the new
    /// budget covers the time spent at `now`. Returns the stored value.
    pub fn plan(&mut self, minutes: f64, now: DateTime<Utc>) -> f64 {
        let planned = clamp_planned(minutes);
        self.planned_minutes = planned;
        if planned >= self.total_spent(now) {
            self.overtime_notified = false;
        }
        planned
    }

    /// Opens a session at `now`. Returns `false` when one is already open.
    pub fn open(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_running() {
            return false;
        }
        self.run = RunState::Running { started_at: now };
        true
    }

    /// Closes the open session at `now` and accrues its duration.
    pub fn close(&mut self, now: DateTime<Utc>) -> Option<TimerSession> {
        let started_at = self.started_at()?;
        let session = TimerSession::closed(started_at, now);
        self.spent_minutes += session.duration_minutes();
        self.sessions.push(session.clone());
        self.run = RunState::Stopped;
        Some(session)
    }

    /// Drops the open session without accruing it.
    pub fn abandon(&mut self) {
        self.run = RunState::Stopped;
    }

    /// Clears spent time and history and re-arms overtime detection.
    pub fn clear(&mut self) {
        self.spent_minutes = 0.0;
        self.sessions.clear();
        self.overtime_notified = false;
    }

    /// Marks the overtime crossing at `now`. Returns `true` exactly once per
    /// excursion.
    pub fn detect_overtime(&mut self, now: DateTime<Utc>) -> bool {
        if self.overtime_notified || !self.is_running() || self.planned_minutes <= 0.0 {
            return false;
        }
        if self.total_spent(now) > self.planned_minutes {
            self.overtime_notified = true;
            return true;
        }
        false
    }

    /// Checks a timer read back from storage. The budget is re-clamped; a
    /// record whose spent time is negative, non-finite or disagrees with its
    /// sessions is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTimerRecord`] naming the inconsistency.
    pub fn validated(mut self) -> Result<Self, InvalidTimerRecord> {
        self.planned_minutes = clamp_planned(self.planned_minutes);
        let in_range = |minutes: f64| minutes.is_finite() && minutes >= 0.0;
        if !in_range(self.spent_minutes) {
            return Err(InvalidTimerRecord::SpentOutOfRange(self.spent_minutes));
        }
        if !self
            .sessions
            .iter()
            .all(|session| in_range(session.duration_minutes))
        {
            return Err(InvalidTimerRecord::SessionOutOfRange);
        }
        let recorded: f64 = self.sessions.iter().map(TimerSession::duration_minutes).sum();
        if (recorded - self.spent_minutes).abs() > SPENT_TOLERANCE_MINUTES {
            return Err(InvalidTimerRecord::SpentMismatch {
                spent: self.spent_minutes,
                recorded,
            });
        }
        Ok(self)
    }
}

/// Reasons a restored timer record is discarded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidTimerRecord {
    /// Spent minutes are negative or not finite.
    #[error("spent minutes {0} out of range")]
    SpentOutOfRange(f64),
    /// A session has a negative or non-finite duration.
    #[error("session duration out of range")]
    SessionOutOfRange,
    /// Spent minutes differ from the sum of session durations.
    #[error("spent minutes {spent} do not match session total {recorded}")]
    SpentMismatch {
        /// Stored spent minutes.
        spent: f64,
        /// Sum of session durations.
        recorded: f64,
    },
}
