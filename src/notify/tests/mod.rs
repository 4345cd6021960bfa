//! Unit tests for the notify context.

mod trigger_tests;
