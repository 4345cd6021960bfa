//! Delivery channel abstraction.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::notify::domain::Notification;

/// Result type for delivery operations.
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Shows a notification to the user.
#[async_trait]
pub trait NotificationDelivery: Send + Sync {
    /// Delivers one notification.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] when the channel cannot show it.
    async fn deliver(&self, notification: &Notification) -> DeliveryResult<()>;
}

/// Errors returned by delivery channels.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// The channel is not available on this host.
    #[error("notification channel unavailable: {0}")]
    Unavailable(String),
    /// The channel failed.
    #[error("notification channel error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeliveryError {
    /// Wraps a channel failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
