//! Delivery through the log.

use async_trait::async_trait;

use crate::notify::{
    domain::Notification,
    ports::{DeliveryResult, NotificationDelivery},
};

/// Emits each notification as a structured warning event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDelivery;

#[async_trait]
impl NotificationDelivery for TracingDelivery {
    async fn deliver(&self, notification: &Notification) -> DeliveryResult<()> {
        tracing::warn!(
            title = %notification.title,
            silent = notification.silent,
            "{}",
            notification.body
        );
        Ok(())
    }
}
