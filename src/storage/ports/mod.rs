//! Port contracts for durable storage.

pub mod store;

pub use store::{KeyValueStore, StoreError, StoreResult, validate_key};
