//! Timer engine: the ledger bound to a clock, durable storage and the
//! overtime trigger.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::storage::ports::KeyValueStore;
use crate::task::domain::TaskId;
use crate::timer::{
    domain::{TaskTimer, TimeProgress, TimerLedger, TimerSession, TimerSnapshot, TimerStatus},
    ports::OvertimeTrigger,
};

/// Storage key for the timer snapshot.
pub const TIMERS_KEY: &str = "timers";

/// Owns every task timer.
///
/// Each mutation writes the whole snapshot, active pointer included, under
/// [`TIMERS_KEY`]. Storage failures are logged and the in-memory ledger stays
/// authoritative.
pub struct TimerEngine<S, T, C>
where
    S: KeyValueStore,
    T: OvertimeTrigger + ?Sized,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    trigger: Arc<T>,
    clock: Arc<C>,
    ledger: TimerLedger,
}

impl<S, T, C> TimerEngine<S, T, C>
where
    S: KeyValueStore,
    T: OvertimeTrigger + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates an engine, restoring the persisted snapshot when one is
    /// readable.
    #[must_use]
    pub fn new(store: Arc<S>, trigger: Arc<T>, clock: Arc<C>) -> Self {
        let ledger = restore(store.as_ref());
        Self {
            store,
            trigger,
            clock,
            ledger,
        }
    }

    /// Returns the underlying ledger.
    #[must_use]
    pub const fn ledger(&self) -> &TimerLedger {
        &self.ledger
    }

    /// Returns the current instant according to the engine's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Looks up a timer.
    #[must_use]
    pub fn timer(&self, task_id: &TaskId) -> Option<&TaskTimer> {
        self.ledger.timer(task_id)
    }

    /// Returns the identifier of the running timer.
    #[must_use]
    pub const fn active_timer_id(&self) -> Option<&TaskId> {
        self.ledger.active_timer_id()
    }

    /// Returns the running timer.
    #[must_use]
    pub fn active_timer(&self) -> Option<&TaskTimer> {
        self.ledger.active_timer()
    }

    /// Returns the coarse status of a task's timer.
    #[must_use]
    pub fn status(&self, task_id: &TaskId) -> TimerStatus {
        self.ledger.status(task_id)
    }

    /// Returns `true` when `task_id` is the running timer.
    #[must_use]
    pub fn is_active(&self, task_id: &TaskId) -> bool {
        self.ledger.is_active(task_id)
    }

    /// Returns `true` when any timer is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ledger.is_running()
    }

    /// Projects progress at the clock's current instant.
    #[must_use]
    pub fn time_progress(&self, task_id: &TaskId) -> Option<TimeProgress> {
        self.ledger.time_progress(task_id, self.now())
    }

    /// Projects progress at `now`.
    #[must_use]
    pub fn time_progress_at(&self, task_id: &TaskId, now: DateTime<Utc>) -> Option<TimeProgress> {
        self.ledger.time_progress(task_id, now)
    }

    /// Sets a task's budget, clamped to eight hours. Returns the stored value.
    pub fn set_planned_time(&mut self, task_id: &TaskId, minutes: f64) -> f64 {
        let now = self.now();
        let planned = self.ledger.set_planned_time(task_id, minutes, now);
        tracing::debug!(task_id = %task_id, planned, "planned time set");
        self.persist();
        planned
    }

    /// Starts a task's timer, stopping whichever other timer was running.
    pub fn start(&mut self, task_id: &TaskId) {
        let now = self.now();
        if self.ledger.start(task_id, now) {
            tracing::debug!(task_id = %task_id, "timer started");
            self.persist();
        }
    }

    /// Stops a running timer, returning the session it closed.
    pub fn stop(&mut self, task_id: &TaskId) -> Option<TimerSession> {
        let now = self.now();
        let session = self.ledger.stop(task_id, now)?;
        tracing::debug!(
            task_id = %task_id,
            minutes = session.duration_minutes(),
            "timer stopped"
        );
        self.persist();
        Some(session)
    }

    /// Same transition as [`TimerEngine::stop`].
    pub fn pause(&mut self, task_id: &TaskId) -> Option<TimerSession> {
        self.stop(task_id)
    }

    /// Stops a timer if running and clears its spent time and history.
    pub fn reset(&mut self, task_id: &TaskId) -> bool {
        let now = self.now();
        let reset = self.ledger.reset(task_id, now);
        if reset {
            tracing::debug!(task_id = %task_id, "timer reset");
            self.persist();
        }
        reset
    }

    /// Stops a timer if running and removes it.
    pub fn delete(&mut self, task_id: &TaskId) -> bool {
        let now = self.now();
        let deleted = self.ledger.delete(task_id, now);
        if deleted {
            tracing::debug!(task_id = %task_id, "timer deleted");
            self.persist();
        }
        deleted
    }

    /// Removes every timer.
    pub fn clear_all(&mut self) {
        self.ledger.clear_all();
        self.persist();
    }

    /// Runs overtime detection at the clock's current instant.
    pub fn tick(&mut self) -> Vec<TaskId> {
        let now = self.now();
        self.tick_at(now)
    }

    /// Runs overtime detection at `now`, firing the trigger once for each
    /// timer that just crossed its budget.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Vec<TaskId> {
        let crossed = self.ledger.tick(now);
        if crossed.is_empty() {
            return crossed;
        }
        self.persist();
        for task_id in &crossed {
            tracing::info!(task_id = %task_id, "timer went over budget");
            self.trigger.notify_overtime(task_id);
        }
        crossed
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.ledger.snapshot())
            .map_err(|err| err.to_string())
            .and_then(|json| {
                self.store
                    .set(TIMERS_KEY, &json)
                    .map_err(|err| err.to_string())
            });
        if let Err(error) = result {
            tracing::warn!(%error, "failed to persist timers");
        }
    }
}

fn restore(store: &impl KeyValueStore) -> TimerLedger {
    let raw = match store.get(TIMERS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return TimerLedger::new(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read timers");
            return TimerLedger::new();
        }
    };
    match TimerSnapshot::from_json(&raw) {
        Ok(snapshot) => TimerLedger::restore(snapshot),
        Err(err) => {
            tracing::warn!(error = %err, "discarding corrupt timer snapshot");
            TimerLedger::new()
        }
    }
}
