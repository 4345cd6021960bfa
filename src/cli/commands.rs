//! Command handlers.

use std::io::Write;

use eyre::WrapErr;

use super::{App, Command, FilterCommand, PresetCommand, TasksCommand, TimerCommand, render};
use crate::filter::domain::{FilterOperator, FilterValue, NewFilter, SortDirection};
use crate::task::{
    domain::{AttributeType, TaskId},
    ports::TaskSource,
};
use crate::timer::domain::format_clock;

/// Runs one command, writing its report to `out`.
///
/// Task source failures are reported on `out` rather than returned; only
/// invalid arguments and output failures are errors.
///
/// # Errors
///
/// Returns an error for unparseable arguments or when writing fails.
pub async fn run(app: &mut App, command: Command, out: &mut impl Write) -> eyre::Result<()> {
    match command {
        Command::Tasks(command) => run_tasks(app, command, out).await,
        Command::Timer(command) => run_timer(app, command, out).await,
        Command::Filter(command) => run_filter(app, command, out),
        Command::Preset(command) => run_preset(app, command, out),
    }
}

async fn run_tasks(app: &mut App, command: TasksCommand, out: &mut impl Write) -> eyre::Result<()> {
    match command {
        TasksCommand::List { all } => {
            if !refresh(app, out).await? {
                return Ok(());
            }
            let tasks = app.registry.tasks();
            let visible: Vec<_> = if all {
                tasks.iter().collect()
            } else {
                app.filters.apply(tasks)
            };
            app.timers.with_engine(|engine| {
                let now = engine.now();
                for task in &visible {
                    writeln!(out, "{}", render::task_row(task, engine.timer(task.id()), now))?;
                }
                writeln!(out, "{} of {} task(s) shown", visible.len(), tasks.len())
            })?;
        }
        TasksCommand::Order { ids } => {
            if !refresh(app, out).await? {
                return Ok(());
            }
            let order: Vec<TaskId> = ids.into_iter().map(TaskId::from).collect();
            app.registry.reorder(&order);
            for task in app.registry.tasks() {
                writeln!(out, "{}\t{}", task.id(), task.title())?;
            }
        }
        TasksCommand::Check => {
            let credentials = app.credentials();
            let reachable = app.source.test_connection(&credentials).await;
            writeln!(
                out,
                "{}",
                if reachable { "connection ok" } else { "connection failed" }
            )?;
        }
    }
    Ok(())
}

async fn refresh(app: &mut App, out: &mut impl Write) -> eyre::Result<bool> {
    match app.refresh_tasks().await {
        Ok(()) => Ok(true),
        Err(err) => {
            writeln!(out, "error: {err}")?;
            Ok(false)
        }
    }
}

async fn run_timer(app: &mut App, command: TimerCommand, out: &mut impl Write) -> eyre::Result<()> {
    match command {
        TimerCommand::Plan { id, minutes } => {
            let planned = app.timers.set_planned_time(&TaskId::from(id.as_str()), minutes);
            writeln!(out, "{id}: planned {planned} minute(s)")?;
        }
        TimerCommand::Start(task) => {
            let id = TaskId::from(task.id);
            app.timers.start(&id);
            write_status(app, &id, out)?;
        }
        TimerCommand::Stop(task) | TimerCommand::Pause(task) => {
            let id = TaskId::from(task.id);
            match app.timers.stop(&id) {
                Some(session) => writeln!(
                    out,
                    "{id}: stopped after {}",
                    format_clock(session.duration_minutes())
                )?,
                None => writeln!(out, "{id}: not running")?,
            }
        }
        TimerCommand::Reset(task) => {
            let id = TaskId::from(task.id);
            let outcome = if app.timers.reset(&id) { "reset" } else { "no timer" };
            writeln!(out, "{id}: {outcome}")?;
        }
        TimerCommand::Delete(task) => {
            let id = TaskId::from(task.id);
            let outcome = if app.timers.delete(&id) { "deleted" } else { "no timer" };
            writeln!(out, "{id}: {outcome}")?;
        }
        TimerCommand::Status { id: Some(id) } => write_status(app, &TaskId::from(id), out)?,
        TimerCommand::Status { id: None } => {
            app.timers.with_engine(|engine| -> std::io::Result<()> {
                let now = engine.now();
                for timer in engine.ledger().timers() {
                    writeln!(out, "{}", render::timer_summary(timer.task_id(), Some(timer), now))?;
                }
                if engine.ledger().is_empty() {
                    writeln!(out, "no timers")?;
                }
                Ok(())
            })?;
        }
        TimerCommand::Clear => {
            app.timers.clear_all();
            writeln!(out, "all timers removed")?;
        }
        TimerCommand::Watch => watch(app, out).await?,
    }
    Ok(())
}

fn write_status(app: &App, id: &TaskId, out: &mut impl Write) -> std::io::Result<()> {
    app.timers.with_engine(|engine| {
        writeln!(out, "{}", render::timer_summary(id, engine.timer(id), engine.now()))
    })
}

async fn watch(app: &mut App, out: &mut impl Write) -> eyre::Result<()> {
    if app.refresh_tasks().await.is_err() {
        tracing::debug!("watching without task titles");
    }
    let Some(active) = app.timers.with_engine(|engine| engine.active_timer_id().cloned()) else {
        writeln!(out, "no timer running")?;
        return Ok(());
    };
    let period = app.timers.period();
    loop {
        write_status(app, &active, out)?;
        out.flush()?;
        if !app.timers.is_ticking() {
            break;
        }
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.wrap_err("failed to listen for interrupt")?;
                break;
            }
            () = tokio::time::sleep(period) => {}
        }
    }
    Ok(())
}

fn run_filter(app: &mut App, command: FilterCommand, out: &mut impl Write) -> eyre::Result<()> {
    match command {
        FilterCommand::Add {
            property,
            property_type,
            operator,
            value,
        } => {
            let kind = AttributeType::try_from(property_type.as_str())
                .map_err(|err| eyre::eyre!("unknown attribute type {:?}", err.0))?;
            let operator = FilterOperator::try_from(operator.as_str())
                .map_err(|err| eyre::eyre!("unknown operator {:?}", err.0))?;
            let mut request = NewFilter::new(property, kind, operator);
            if let Some(raw) = value {
                request = request.with_value(FilterValue::infer(&raw));
            }
            match app.filters.add_filter(request) {
                Some(id) => writeln!(out, "added filter {id}")?,
                None => writeln!(out, "operator {operator} does not apply to {kind}")?,
            }
        }
        FilterCommand::List => {
            for filter in app.filters.filters() {
                writeln!(out, "{}", render::filter_row(filter))?;
            }
            writeln!(out, "{}", render::sort_row(app.filters.sort()))?;
        }
        FilterCommand::Toggle { id } => match app.filters.toggle_filter(id) {
            Some(true) => writeln!(out, "filter {id} active")?,
            Some(false) => writeln!(out, "filter {id} inactive")?,
            None => writeln!(out, "no filter {id}")?,
        },
        FilterCommand::Remove { id } => {
            let outcome = if app.filters.remove_filter(id) { "removed" } else { "not found" };
            writeln!(out, "filter {id} {outcome}")?;
        }
        FilterCommand::Clear => {
            app.filters.clear_filters();
            writeln!(out, "filters cleared")?;
        }
        FilterCommand::Sort { property, desc } => {
            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
            app.filters.set_sorting(property, direction);
            writeln!(out, "{}", render::sort_row(app.filters.sort()))?;
        }
    }
    Ok(())
}

fn run_preset(app: &mut App, command: PresetCommand, out: &mut impl Write) -> eyre::Result<()> {
    match command {
        PresetCommand::Save { name } => {
            let id = app.filters.save_preset(name);
            writeln!(out, "saved preset {id}")?;
        }
        PresetCommand::Load { id } => {
            let outcome = if app.filters.load_preset(id) { "loaded" } else { "not found" };
            writeln!(out, "preset {id} {outcome}")?;
        }
        PresetCommand::Delete { id } => {
            let outcome = if app.filters.delete_preset(id) { "deleted" } else { "not found" };
            writeln!(out, "preset {id} {outcome}")?;
        }
        PresetCommand::List => {
            for preset in app.filters.presets() {
                writeln!(out, "{}", render::preset_row(preset))?;
            }
        }
    }
    Ok(())
}
