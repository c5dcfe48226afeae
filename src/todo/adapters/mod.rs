//! Adapter implementations for todo lifecycle ports.

pub mod memory;
pub mod postgres;
