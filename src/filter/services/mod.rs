//! Application services for the live filter set.

mod store;

pub use store::{FILTERS_KEY, FilterState, FilterStore};
