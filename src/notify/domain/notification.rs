//! Notification payload.

use crate::task::domain::TaskId;

/// Title of every overtime notification.
pub const OVERTIME_TITLE: &str = "Overtime!";

/// One message for the delivery channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short headline.
    pub title: String,
    /// Message body.
    pub body: String,
    /// Deliver without sound.
    pub silent: bool,
}

impl Notification {
    /// Builds the overtime notice for a task, naming it by title when known.
    #[must_use]
    pub fn overtime(task_id: &TaskId, task_title: Option<&str>, silent: bool) -> Self {
        let subject =
            task_title.map_or_else(|| task_id.to_string(), |title| format!("\"{title}\""));
        Self {
            title: OVERTIME_TITLE.to_owned(),
            body: format!("Planned time for {subject} has run out"),
            silent,
        }
    }
}
