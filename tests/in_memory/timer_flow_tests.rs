//! In-memory integration tests for the timer engine.

use std::sync::Arc;

use planme::storage::adapters::InMemoryStore;
use planme::task::domain::TaskId;
use planme::timer::{
    domain::TimerStatus,
    services::{TimerEngine, TimerRuntime},
};
use rstest::{fixture, rstest};

use crate::test_helpers::{CountingTrigger, ManualClock};

struct Harness {
    store: Arc<InMemoryStore>,
    trigger: Arc<CountingTrigger>,
    clock: Arc<ManualClock>,
}

impl Harness {
    fn engine(&self) -> TimerEngine<InMemoryStore, CountingTrigger, ManualClock> {
        TimerEngine::new(
            Arc::clone(&self.store),
            Arc::clone(&self.trigger),
            Arc::clone(&self.clock),
        )
    }
}

#[fixture]
fn harness() -> Harness {
    Harness {
        store: Arc::new(InMemoryStore::new()),
        trigger: Arc::new(CountingTrigger::default()),
        clock: Arc::new(ManualClock::new()),
    }
}

#[rstest]
fn at_most_one_timer_runs(harness: Harness) -> Result<(), eyre::Report> {
    let mut engine = harness.engine();
    let ids: Vec<TaskId> = ["a", "b", "c"].into_iter().map(TaskId::from).collect();

    for (minute, id) in (0_i64..).zip(&ids) {
        harness.clock.set_minute(minute);
        engine.start(id);
        let running = engine
            .ledger()
            .timers()
            .filter(|timer| timer.is_running())
            .count();
        eyre::ensure!(running == 1, "expected one running timer, found {running}");
        eyre::ensure!(engine.active_timer_id() == Some(id));
    }

    eyre::ensure!(engine.status(&TaskId::from("a")) == TimerStatus::Paused);
    Ok(())
}

#[rstest]
fn overtime_reported_once_then_again_after_reset(harness: Harness) -> Result<(), eyre::Report> {
    let mut engine = harness.engine();
    let task = TaskId::from("report");

    engine.set_planned_time(&task, 10.0);
    engine.start(&task);
    for minute in [11, 12, 13] {
        harness.clock.set_minute(minute);
        engine.tick();
    }
    eyre::ensure!(harness.trigger.count_for(&task) == 1);

    engine.reset(&task);
    engine.start(&task);
    harness.clock.set_minute(24);
    engine.tick();
    eyre::ensure!(harness.trigger.count_for(&task) == 2);
    Ok(())
}

#[rstest]
fn overtime_flag_survives_restart(harness: Harness) -> Result<(), eyre::Report> {
    let task = TaskId::from("report");
    {
        let mut engine = harness.engine();
        engine.set_planned_time(&task, 10.0);
        engine.start(&task);
        harness.clock.set_minute(11);
        engine.tick();
    }

    let mut restored = harness.engine();
    harness.clock.set_minute(12);
    restored.tick();

    eyre::ensure!(harness.trigger.total() == 1);
    eyre::ensure!(restored.is_active(&task));
    Ok(())
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn runtime_tick_reports_overtime(harness: Harness) -> Result<(), eyre::Report> {
    let task = TaskId::from("report");
    let mut runtime = TimerRuntime::new(harness.engine(), std::time::Duration::from_secs(1));

    runtime.set_planned_time(&task, 10.0);
    runtime.start(&task);
    harness.clock.set_minute(11);
    tokio::time::sleep(std::time::Duration::from_millis(2500)).await;

    eyre::ensure!(harness.trigger.count_for(&task) == 1);
    runtime.stop(&task);
    eyre::ensure!(!runtime.is_ticking());
    Ok(())
}
