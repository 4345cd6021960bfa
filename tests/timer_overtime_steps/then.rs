//! Then steps for timer overtime BDD scenarios.

use super::world::TimerWorld;
use planme::task::domain::TaskId;
use rstest_bdd_macros::then;

#[then(r#"only timer "{task}" is running"#)]
fn only_timer_running(world: &TimerWorld, task: String) -> Result<(), eyre::Report> {
    let running: Vec<&TaskId> = world
        .engine
        .ledger()
        .timers()
        .filter(|timer| timer.is_running())
        .map(|timer| timer.task_id())
        .collect();
    let expected = TaskId::from(task);
    eyre::ensure!(
        running == [&expected],
        "expected only {expected} running, found {running:?}"
    );
    eyre::ensure!(world.engine.active_timer_id() == Some(&expected));
    Ok(())
}

#[then(r#"timer "{task}" has {count:usize} session totalling {minutes:f64} minutes"#)]
fn timer_has_sessions(
    world: &TimerWorld,
    task: String,
    count: usize,
    minutes: f64,
) -> Result<(), eyre::Report> {
    let timer = world
        .engine
        .timer(&TaskId::from(task.as_str()))
        .ok_or_else(|| eyre::eyre!("no timer {task}"))?;
    eyre::ensure!(
        timer.sessions().len() == count,
        "expected {count} session(s), found {}",
        timer.sessions().len()
    );
    let total: f64 = timer
        .sessions()
        .iter()
        .map(|session| session.duration_minutes())
        .sum();
    eyre::ensure!((total - minutes).abs() < 1e-9, "sessions total {total}");
    eyre::ensure!((timer.spent_minutes() - minutes).abs() < 1e-9);
    Ok(())
}

#[then(r#"timer "{task}" has {minutes:f64} minutes spent"#)]
fn timer_has_spent(world: &TimerWorld, task: String, minutes: f64) -> Result<(), eyre::Report> {
    let timer = world
        .engine
        .timer(&TaskId::from(task.as_str()))
        .ok_or_else(|| eyre::eyre!("no timer {task}"))?;
    let spent = timer.total_spent(world.engine.now());
    eyre::ensure!((spent - minutes).abs() < 1e-9, "expected {minutes} spent, found {spent}");
    Ok(())
}

#[then(r#"the overtime report count for "{task}" is {count:usize}"#)]
fn overtime_reported(world: &TimerWorld, task: String, count: usize) -> Result<(), eyre::Report> {
    let reported = world.trigger.count_for(&TaskId::from(task.as_str()));
    eyre::ensure!(reported == count, "expected {count} report(s), found {reported}");
    Ok(())
}
