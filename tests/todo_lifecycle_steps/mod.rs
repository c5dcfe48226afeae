//! Step definitions for todo lifecycle behaviour tests.

pub mod world;

mod given;
mod when;
