//! When steps for timer overtime BDD scenarios.

use super::world::TimerWorld;
use planme::task::domain::TaskId;
use rstest_bdd_macros::when;

#[when(r#"timer "{task}" starts at minute {minute:i64}"#)]
fn timer_starts(world: &mut TimerWorld, task: String, minute: i64) {
    world.clock.set_minute(minute);
    world.engine.start(&TaskId::from(task));
}

#[when("the tick runs at minute {minute:i64}")]
fn tick_runs(world: &mut TimerWorld, minute: i64) {
    world.clock.set_minute(minute);
    world.engine.tick();
}

#[when(r#"timer "{task}" is reset at minute {minute:i64}"#)]
fn timer_is_reset(world: &mut TimerWorld, task: String, minute: i64) -> Result<(), eyre::Report> {
    world.clock.set_minute(minute);
    eyre::ensure!(
        world.engine.reset(&TaskId::from(task.as_str())),
        "no timer {task} to reset"
    );
    Ok(())
}

#[when(r#"timer "{task}" is planned for {minutes:f64} minutes at minute {minute:i64}"#)]
fn timer_is_replanned(world: &mut TimerWorld, task: String, minutes: f64, minute: i64) {
    world.clock.set_minute(minute);
    world.engine.set_planned_time(&TaskId::from(task), minutes);
}

#[when("the engine restarts at minute {minute:i64}")]
fn engine_restarts(world: &mut TimerWorld, minute: i64) {
    world.clock.set_minute(minute);
    world.restart();
}
