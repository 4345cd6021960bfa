//! In-memory delivery for tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::notify::{
    domain::Notification,
    ports::{DeliveryError, DeliveryResult, NotificationDelivery},
};

/// Collects delivered notifications; can be told to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingDelivery {
    delivered: Arc<Mutex<Vec<Notification>>>,
    failure: Arc<Mutex<Option<DeliveryError>>>,
}

impl RecordingDelivery {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later delivery fail with `error`.
    pub fn fail_with(&self, error: DeliveryError) {
        *self.failure.lock() = Some(error);
    }

    /// Returns the notifications delivered so far.
    #[must_use]
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().clone()
    }
}

#[async_trait]
impl NotificationDelivery for RecordingDelivery {
    async fn deliver(&self, notification: &Notification) -> DeliveryResult<()> {
        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }
        self.delivered.lock().push(notification.clone());
        Ok(())
    }
}
