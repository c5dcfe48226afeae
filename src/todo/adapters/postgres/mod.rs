//! `PostgreSQL` adapters for todo item persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTodoRepository, TodoPgPool};
