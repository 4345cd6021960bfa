//! Unit tests for the storage adapters.
