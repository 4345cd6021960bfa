//! Task records fetched from the external task source.
//!
//! Tasks carry a title and an ordered set of typed attributes. The registry
//! holds the fetched list, the user-chosen ordering and the load status. The
//! module follows hexagonal architecture:
//!
//! - Domain types, including the attribute value model, in [`domain`]
//! - The task-source port in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The task registry service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
