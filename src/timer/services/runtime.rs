//! Periodic tick driving overtime detection while a timer runs.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::TimerEngine;
use crate::storage::ports::KeyValueStore;
use crate::task::domain::TaskId;
use crate::timer::domain::TimerSession;
use crate::timer::ports::OvertimeTrigger;

/// Shares a [`TimerEngine`] with a background tick task.
///
/// The tick task exists only while some timer is running: timer operations
/// made through the runtime start it when a timer starts and abort it once
/// none runs. The task also ends on its own when it observes that nothing
/// is running.
pub struct TimerRuntime<S, T, C>
where
    S: KeyValueStore + 'static,
    T: OvertimeTrigger + ?Sized + 'static,
    C: Clock + Send + Sync + 'static,
{
    engine: Arc<Mutex<TimerEngine<S, T, C>>>,
    period: Duration,
    ticker: Option<JoinHandle<()>>,
}

impl<S, T, C> TimerRuntime<S, T, C>
where
    S: KeyValueStore + 'static,
    T: OvertimeTrigger + ?Sized + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Wraps `engine`, ticking every `period` (at least one second). A
    /// restored running timer starts the tick immediately.
    #[must_use]
    pub fn new(engine: TimerEngine<S, T, C>, period: Duration) -> Self {
        let mut runtime = Self {
            engine: Arc::new(Mutex::new(engine)),
            period: period.max(Duration::from_secs(1)),
            ticker: None,
        };
        runtime.sync_ticker();
        runtime
    }

    /// Returns the shared engine.
    #[must_use]
    pub fn engine(&self) -> Arc<Mutex<TimerEngine<S, T, C>>> {
        Arc::clone(&self.engine)
    }

    /// Runs `read` against the engine.
    pub fn with_engine<R>(&self, read: impl FnOnce(&TimerEngine<S, T, C>) -> R) -> R {
        read(&self.engine.lock())
    }

    /// Returns the tick period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` while the tick task is alive.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// See [`TimerEngine::set_planned_time`].
    pub fn set_planned_time(&mut self, task_id: &TaskId, minutes: f64) -> f64 {
        self.engine.lock().set_planned_time(task_id, minutes)
    }

    /// See [`TimerEngine::start`].
    pub fn start(&mut self, task_id: &TaskId) {
        self.engine.lock().start(task_id);
        self.sync_ticker();
    }

    /// See [`TimerEngine::stop`].
    pub fn stop(&mut self, task_id: &TaskId) -> Option<TimerSession> {
        let session = self.engine.lock().stop(task_id);
        self.sync_ticker();
        session
    }

    /// See [`TimerEngine::pause`].
    pub fn pause(&mut self, task_id: &TaskId) -> Option<TimerSession> {
        self.stop(task_id)
    }

    /// See [`TimerEngine::reset`].
    pub fn reset(&mut self, task_id: &TaskId) -> bool {
        let reset = self.engine.lock().reset(task_id);
        self.sync_ticker();
        reset
    }

    /// See [`TimerEngine::delete`].
    pub fn delete(&mut self, task_id: &TaskId) -> bool {
        let deleted = self.engine.lock().delete(task_id);
        self.sync_ticker();
        deleted
    }

    /// See [`TimerEngine::clear_all`].
    pub fn clear_all(&mut self) {
        self.engine.lock().clear_all();
        self.sync_ticker();
    }

    /// Aborts the tick task.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    fn sync_ticker(&mut self) {
        if !self.engine.lock().is_running() {
            self.shutdown();
            return;
        }
        if self.is_ticking() {
            return;
        }
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("no async runtime available; overtime tick disabled");
            return;
        };
        let engine = Arc::clone(&self.engine);
        let period = self.period;
        tracing::debug!(period_secs = period.as_secs(), "starting timer tick");
        self.ticker = Some(handle.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut guard = engine.lock();
                guard.tick();
                if !guard.is_running() {
                    tracing::debug!("no timer running; tick ends");
                    break;
                }
            }
        }));
    }
}

impl<S, T, C> Drop for TimerRuntime<S, T, C>
where
    S: KeyValueStore + 'static,
    T: OvertimeTrigger + ?Sized + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}
