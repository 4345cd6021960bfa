//! Planme: per-task work timers with planned budgets, overtime alerts and
//! attribute filtering.
//!
//! # Architecture
//!
//! Each component follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and rules with no infrastructure dependencies
//! - **Ports**: Trait interfaces for storage, task sources and notifications
//! - **Adapters**: Concrete implementations of ports
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`storage`]: Key-value persistence
//! - [`task`]: Tasks, the attribute value model and the task registry
//! - [`filter`]: Filters, presets and the filter and sort engine
//! - [`timer`]: Task timers, overtime detection and the periodic tick
//! - [`notify`]: Overtime notification delivery
//! - [`config`]: TOML configuration
//! - [`cli`]: The `planme` command-line surface

pub mod cli;
pub mod config;
pub mod filter;
pub mod notify;
pub mod storage;
pub mod task;
pub mod timer;
