//! Overtime notifications: settings, the delivery port and the trigger that
//! bridges timer overtime crossings to deliveries.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
