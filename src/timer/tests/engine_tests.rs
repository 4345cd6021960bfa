//! Tests for the persisting timer engine.

use std::sync::Arc;

use super::support::{ManualClock, at, t0};
use crate::storage::{adapters::InMemoryStore, ports::KeyValueStore};
use crate::task::domain::TaskId;
use crate::timer::{
    domain::{TimerSnapshot, TimerStatus},
    ports::{MockOvertimeTrigger, OvertimeTrigger},
    services::{TIMERS_KEY, TimerEngine},
};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

type Engine<T> = TimerEngine<InMemoryStore, T, ManualClock>;

#[fixture]
fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

#[fixture]
fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(t0()))
}

fn quiet_trigger() -> Arc<MockOvertimeTrigger> {
    let mut trigger = MockOvertimeTrigger::new();
    trigger.expect_notify_overtime().never();
    Arc::new(trigger)
}

fn persisted(store: &InMemoryStore) -> eyre::Result<TimerSnapshot> {
    let raw = store
        .get(TIMERS_KEY)?
        .ok_or_else(|| eyre::eyre!("no timer snapshot"))?;
    Ok(TimerSnapshot::from_json(&raw)?)
}

#[rstest]
fn overtime_triggers_once_for_consecutive_ticks(
    store: Arc<InMemoryStore>,
    clock: Arc<ManualClock>,
) {
    let task = TaskId::from("report");
    let mut trigger = MockOvertimeTrigger::new();
    trigger
        .expect_notify_overtime()
        .with(eq(task.clone()))
        .times(2)
        .return_const(());
    let mut engine: Engine<MockOvertimeTrigger> =
        TimerEngine::new(store, Arc::new(trigger), Arc::clone(&clock));

    engine.set_planned_time(&task, 10.0);
    engine.start(&task);
    for minute in [11, 12, 13] {
        clock.set(at(minute));
        engine.tick();
    }

    engine.reset(&task);
    engine.start(&task);
    clock.advance_minutes(11);
    assert_eq!(engine.tick(), vec![task]);
}

#[rstest]
fn every_mutation_writes_snapshot(
    store: Arc<InMemoryStore>,
    clock: Arc<ManualClock>,
) -> eyre::Result<()> {
    let task = TaskId::from("a");
    let mut engine = TimerEngine::new(Arc::clone(&store), quiet_trigger(), Arc::clone(&clock));

    engine.start(&task);
    let snapshot = persisted(&store)?;
    eyre::ensure!(snapshot.active_timer_id.as_ref() == Some(&task));

    clock.advance_minutes(3);
    let session = engine.stop(&task).ok_or_else(|| eyre::eyre!("no session"))?;
    eyre::ensure!(session.duration_minutes() == 3.0);
    let snapshot = persisted(&store)?;
    eyre::ensure!(snapshot.active_timer_id.is_none());
    eyre::ensure!(snapshot.timers.first().map(|timer| timer.spent_minutes()) == Some(3.0));

    engine.clear_all();
    eyre::ensure!(persisted(&store)?.timers.is_empty());
    Ok(())
}

#[rstest]
fn running_timer_survives_restart(store: Arc<InMemoryStore>, clock: Arc<ManualClock>) {
    let task = TaskId::from("a");
    {
        let mut engine =
            TimerEngine::new(Arc::clone(&store), quiet_trigger(), Arc::clone(&clock));
        engine.set_planned_time(&task, 25.0);
        engine.start(&task);
    }
    clock.advance_minutes(5);

    let engine = TimerEngine::new(store, quiet_trigger(), clock);
    assert!(engine.is_active(&task));
    assert_eq!(engine.status(&task), TimerStatus::Running);
    let progress = engine.time_progress(&task).expect("budgeted");
    assert_eq!(progress.spent, 5.0);
    assert_eq!(progress.remaining, 20.0);
}

#[rstest]
#[case("{corrupt")]
#[case(r#"{"active_timer_id": 12}"#)]
fn corrupt_snapshot_starts_idle(#[case] raw: &str, clock: Arc<ManualClock>) {
    let store = Arc::new(InMemoryStore::with_entry(TIMERS_KEY, raw));
    let engine = TimerEngine::new(store, quiet_trigger(), clock);
    assert!(engine.ledger().is_empty());
    assert!(engine.active_timer().is_none());
    assert!(!engine.is_running());
}

#[rstest]
fn failed_writes_leave_memory_authoritative(clock: Arc<ManualClock>) {
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> crate::storage::ports::StoreResult<Option<String>> {
            Err(crate::storage::ports::StoreError::backend(std::io::Error::other(
                "disk gone",
            )))
        }

        fn set(&self, _key: &str, _value: &str) -> crate::storage::ports::StoreResult<()> {
            Err(crate::storage::ports::StoreError::backend(std::io::Error::other(
                "disk gone",
            )))
        }

        fn remove(&self, _key: &str) -> crate::storage::ports::StoreResult<()> {
            Ok(())
        }
    }

    let task = TaskId::from("a");
    let mut engine = TimerEngine::new(Arc::new(BrokenStore), quiet_trigger(), clock);
    engine.start(&task);
    assert!(engine.is_active(&task));
}

#[rstest]
fn trigger_trait_object_is_accepted(store: Arc<InMemoryStore>, clock: Arc<ManualClock>) {
    let trigger: Arc<dyn OvertimeTrigger> = quiet_trigger();
    let mut engine = TimerEngine::new(store, trigger, clock);
    engine.set_planned_time(&TaskId::from("a"), 1.0);
    assert_eq!(engine.tick(), Vec::<TaskId>::new());
}
