//! Application services for overtime notifications.

mod trigger;

pub use trigger::NotificationTrigger;
