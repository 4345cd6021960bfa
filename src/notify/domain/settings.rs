//! User preferences for overtime notifications.

use serde::{Deserialize, Serialize};

/// Which overtime notifications are wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Master switch; when off, overtime crossings are only logged.
    pub enable_overtime_notifications: bool,
    /// Deliver with sound.
    pub enable_overtime_sound: bool,
    /// Deliver through the system notification channel.
    pub enable_system_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enable_overtime_notifications: true,
            enable_overtime_sound: true,
            enable_system_notifications: true,
        }
    }
}

impl NotificationSettings {
    /// Returns `true` when an overtime crossing should reach the delivery
    /// channel.
    #[must_use]
    pub const fn delivers(&self) -> bool {
        self.enable_overtime_notifications && self.enable_system_notifications
    }

    /// Returns `true` when deliveries should be silent.
    #[must_use]
    pub const fn silent(&self) -> bool {
        !self.enable_overtime_sound
    }
}
