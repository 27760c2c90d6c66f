//! Task lifecycle management.
//!
//! Tasks carry a title (which may embed priority and deadline macros), an
//! optional description and deadline, a priority, a completion flag, and a
//! derived status. The module follows hexagonal architecture:
//!
//! - Domain types and pure rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services, including the overdue sweep, in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
