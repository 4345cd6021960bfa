//! Unit tests for the filter context.
