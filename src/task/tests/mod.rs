//! Unit tests for the task context.

mod registry_tests;
