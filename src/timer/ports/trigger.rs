//! Edge-triggered overtime callback.

use crate::task::domain::TaskId;

/// Receives a call each time a running timer first exceeds its budget.
///
/// Called at most once per overtime excursion. Implementations must return
/// promptly and must not call back into the timer engine.
#[cfg_attr(test, mockall::automock)]
pub trait OvertimeTrigger: Send + Sync {
    /// Reports that `task_id` just went over budget.
    fn notify_overtime(&self, task_id: &TaskId);
}
