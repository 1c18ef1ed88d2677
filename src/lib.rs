//! Taskboard: a small task-tracking service and its client.
//!
//! The server exposes a JSON API for creating, listing, editing, completing,
//! and deleting short-lived task records stored in a single `PostgreSQL`
//! table. The client wraps that API with request timeouts and keeps a local
//! view of the most recent tasks, applying optimistic updates where the
//! result is predictable.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, persistence, and lifecycle operations
//! - [`http`]: The HTTP surface over the task service
//! - [`client`]: HTTP client and local view state
//! - [`config`]: Environment-backed configuration

pub mod client;
pub mod config;
pub mod http;
pub mod task;
