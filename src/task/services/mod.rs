//! Application services for the fetched task list.

mod registry;

pub use registry::{LoadState, TASK_ORDER_KEY, TaskRegistry};
