//! Port contracts for todo lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by and driving the
//! todo services.

pub mod repository;
pub mod sweep;

pub use repository::{TodoRepository, TodoRepositoryError, TodoRepositoryResult};
pub use sweep::{OverdueSweep, OverdueSweepReport};
