//! Delivery adapters.

mod recording;
mod tracing_log;

pub use recording::RecordingDelivery;
pub use tracing_log::TracingDelivery;
