//! Port contracts for notification delivery.

pub mod delivery;

pub use delivery::{DeliveryError, DeliveryResult, NotificationDelivery};
