//! Given steps for timer overtime BDD scenarios.

use super::world::TimerWorld;
use planme::task::domain::TaskId;
use rstest_bdd_macros::given;

#[given("no timers exist")]
fn no_timers_exist(world: &mut TimerWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.engine.ledger().is_empty(), "expected an empty ledger");
    Ok(())
}

#[given(r#"timer "{task}" is planned for {minutes:f64} minutes"#)]
fn timer_is_planned(world: &mut TimerWorld, task: String, minutes: f64) {
    world.engine.set_planned_time(&TaskId::from(task), minutes);
}
