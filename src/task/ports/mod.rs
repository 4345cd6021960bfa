//! Port contracts for the external task source.

pub mod source;

pub use source::{Credentials, TaskSource, TaskSourceError, TaskSourceResult};
