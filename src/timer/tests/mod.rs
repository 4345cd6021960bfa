//! Unit tests for the timer context.

mod display_tests;
mod engine_tests;
mod support;
