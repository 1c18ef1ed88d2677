//! Task lifecycle management.
//!
//! A task is created with a title and optional description, listed while it
//! is incomplete, edited until it is completed, and removed by deletion.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
