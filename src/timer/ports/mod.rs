//! Port contracts for the timer context.

pub mod trigger;

pub use trigger::OvertimeTrigger;

#[cfg(test)]
pub use trigger::MockOvertimeTrigger;
