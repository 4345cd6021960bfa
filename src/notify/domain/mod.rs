//! Notification domain model.

mod notification;
mod settings;

pub use notification::{Notification, OVERTIME_TITLE};
pub use settings::NotificationSettings;
