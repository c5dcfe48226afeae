//! Todo lifecycle: a small task tracker with time-driven status.
//!
//! Items move between not done, done, and past due. An item whose due time
//! has elapsed while it is not done becomes past due and stops accepting
//! edits. The transition is applied lazily whenever an item is read and
//! eagerly by a recurring sweep.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: the item aggregate and its status state machine
//! - **Ports**: storage and sweep trait interfaces
//! - **Adapters**: in-memory and `PostgreSQL` storage
//!
//! # Modules
//!
//! - [`todo`]: domain, ports, adapters, and the lifecycle service
//! - [`api`]: HTTP handlers and router
//! - [`scheduling`]: recurring overdue sweep trigger
//! - [`config`]: environment configuration
//! - [`telemetry`]: tracing subscriber setup

pub mod api;
pub mod config;
pub mod scheduling;
pub mod telemetry;
pub mod todo;
