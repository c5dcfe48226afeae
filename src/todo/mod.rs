//! Todo item lifecycle management.
//!
//! This module creates todo items, serves them back with an up-to-date
//! status, applies partial edits, and promotes overdue items to past due both
//! lazily on read and eagerly through a batch sweep. Past-due items accept no
//! further edits. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
