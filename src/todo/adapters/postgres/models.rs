//! Diesel row models for todo item persistence.

use super::schema::todo_items;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for todo item records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todo_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TodoItemRow {
    /// Item identifier.
    pub id: i64,
    /// Item description.
    pub description: String,
    /// Lifecycle status in storage representation.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Due timestamp.
    pub due_at: DateTime<Utc>,
    /// Completion timestamp.
    pub done_at: Option<DateTime<Utc>>,
}

/// Insert model for items that have not been assigned an identifier yet.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todo_items)]
pub struct NewTodoItemRow {
    /// Item description.
    pub description: String,
    /// Lifecycle status in storage representation.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Due timestamp.
    pub due_at: DateTime<Utc>,
    /// Completion timestamp.
    pub done_at: Option<DateTime<Utc>>,
}

/// Insert model for items that already carry an identifier.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todo_items)]
pub struct IdentifiedTodoItemRow {
    /// Item identifier.
    pub id: i64,
    /// Item description.
    pub description: String,
    /// Lifecycle status in storage representation.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Due timestamp.
    pub due_at: DateTime<Utc>,
    /// Completion timestamp.
    pub done_at: Option<DateTime<Utc>>,
}

/// Mutable columns written when an existing item is saved.
///
/// `created_at` is absent so a save never rewrites it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todo_items)]
#[diesel(treat_none_as_null = true)]
pub struct TodoItemChangeset {
    /// Item description.
    pub description: String,
    /// Lifecycle status in storage representation.
    pub status: String,
    /// Due timestamp.
    pub due_at: DateTime<Utc>,
    /// Completion timestamp; `None` clears the column.
    pub done_at: Option<DateTime<Utc>>,
}
