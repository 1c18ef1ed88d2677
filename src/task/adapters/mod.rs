//! Adapter implementations for task lifecycle ports.

pub mod memory;
pub mod postgres;
