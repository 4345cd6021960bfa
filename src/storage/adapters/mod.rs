//! Adapter implementations for the key-value store port.

pub mod directory;
pub mod memory;

pub use directory::DirectoryStore;
pub use memory::InMemoryStore;
