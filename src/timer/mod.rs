//! Per-task work timers with planned budgets and overtime detection.
//!
//! - Domain types and the pure timer ledger in [`domain`]
//! - The overtime trigger port in [`ports`]
//! - The persisting engine and its periodic tick runtime in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
