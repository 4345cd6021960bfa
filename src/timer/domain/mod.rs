//! Timer domain model.

mod display;
mod ledger;
mod timer;

pub use display::{ProgressLevel, format_clock, format_short};
pub use ledger::{TimerLedger, TimerSnapshot};
pub use timer::{
    InvalidTimerRecord, MAX_PLANNED_MINUTES, RunState, TaskTimer, TimeProgress, TimerSession,
    TimerStatus, elapsed_minutes,
};
