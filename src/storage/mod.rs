//! Durable key-value persistence used by the timer engine, the task registry
//! and the filter store.
//!
//! Callers treat every failure reported here as non-fatal: they log it and
//! keep their in-memory state authoritative.
//!
//! - Port contract in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod ports;

#[cfg(test)]
mod tests;
