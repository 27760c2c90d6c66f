//! Tasklane: task-management backend core.
//!
//! This crate provides task creation and mutation with title macros,
//! derived task statuses, filtered and paginated listings, and a periodic
//! sweep that demotes overdue tasks.
//!
//! # Architecture
//!
//! Tasklane follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, query engine, and overdue sweep
//! - [`config`]: Settings for the sweeper process

pub mod config;
pub mod task;
