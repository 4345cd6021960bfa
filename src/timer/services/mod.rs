//! Application services for task timers.

mod engine;
mod runtime;

pub use engine::{TIMERS_KEY, TimerEngine};
pub use runtime::TimerRuntime;
