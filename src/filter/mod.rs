//! Attribute filters, presets and ordering of the visible task list.
//!
//! - Domain types in [`domain`]
//! - The pure filter and sort engine in [`engine`]
//! - The persisted filter set in [`services`]

pub mod domain;
pub mod engine;
pub mod services;

#[cfg(test)]
mod tests;
