//! Adapter implementations for the task-source port.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileTaskSource;
pub use memory::InMemoryTaskSource;
