//! Step definitions for timer overtime scenarios.

pub mod world;

mod given;
mod then;
mod when;
