//! Command-line surface of the `planme` binary.
//!
//! Argument types live here; [`App`] wires the services together and
//! [`run`] dispatches one parsed command against it.

mod app;
mod commands;
mod render;

pub use app::App;
pub use commands::run;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

use crate::filter::domain::{FilterId, PresetId};

/// Plan, time and filter tasks from the command line.
#[derive(Debug, Parser)]
#[command(name = "planme")]
#[command(about = "Per-task work timers with planned budgets and overtime alerts")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ~/.planme/planme.toml)
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level command groups.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect and order tasks
    #[command(subcommand)]
    Tasks(TasksCommand),
    /// Control task timers
    #[command(subcommand)]
    Timer(TimerCommand),
    /// Manage live filters and sorting
    #[command(subcommand)]
    Filter(FilterCommand),
    /// Manage filter presets
    #[command(subcommand)]
    Preset(PresetCommand),
}

/// Task list commands.
#[derive(Debug, Subcommand)]
pub enum TasksCommand {
    /// List tasks with their timers
    List {
        /// Ignore filters and show every task
        #[arg(long)]
        all: bool,
    },
    /// Move the given tasks to the front, in this order
    Order {
        /// Task identifiers
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Check that the task source is reachable
    Check,
}

/// Target task of a timer command.
#[derive(Debug, Args)]
pub struct TaskArg {
    /// Task identifier
    pub id: String,
}

/// Timer commands.
#[derive(Debug, Subcommand)]
pub enum TimerCommand {
    /// Set a task's planned minutes (0 to 480)
    Plan {
        /// Task identifier
        id: String,
        /// Planned minutes
        #[arg(allow_negative_numbers = true)]
        minutes: f64,
    },
    /// Start a task's timer, stopping any other
    Start(TaskArg),
    /// Stop a task's timer
    Stop(TaskArg),
    /// Pause a task's timer (same as stop)
    Pause(TaskArg),
    /// Clear a task's spent time and sessions
    Reset(TaskArg),
    /// Remove a task's timer
    Delete(TaskArg),
    /// Show one timer, or all of them
    Status {
        /// Task identifier
        id: Option<String>,
    },
    /// Remove every timer
    Clear,
    /// Keep running, reporting overtime, until interrupted
    Watch,
}

/// Live filter commands.
#[derive(Debug, Subcommand)]
pub enum FilterCommand {
    /// Add a filter
    Add {
        /// Attribute name
        property: String,
        /// Attribute type, e.g. `status` or `number`
        property_type: String,
        /// Operator, e.g. `equals` or `greater_than`
        operator: String,
        /// Literal to compare against
        value: Option<String>,
    },
    /// List filters and the current sort
    List,
    /// Flip a filter between active and inactive
    Toggle {
        /// Filter identifier
        id: FilterId,
    },
    /// Remove a filter
    Remove {
        /// Filter identifier
        id: FilterId,
    },
    /// Remove every filter
    Clear,
    /// Sort by an attribute, or clear the sort when none is given
    Sort {
        /// Attribute name
        property: Option<String>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
}

/// Preset commands.
#[derive(Debug, Subcommand)]
pub enum PresetCommand {
    /// Save the live filters under a name
    Save {
        /// Preset name
        name: String,
    },
    /// Replace the live filters with a preset
    Load {
        /// Preset identifier
        id: PresetId,
    },
    /// Delete a preset
    Delete {
        /// Preset identifier
        id: PresetId,
    },
    /// List presets
    List,
}
