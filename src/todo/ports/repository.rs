//! Repository port for todo item persistence and lookup.

use crate::todo::domain::{TodoItem, TodoItemId, TodoStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// Todo item persistence contract.
///
/// Implementations hold no business rules; status decisions belong to the
/// lifecycle service.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Inserts or replaces an item and returns it as stored.
    ///
    /// Items without an identifier are assigned one by the store.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::Persistence`] when the write fails.
    async fn save(&self, item: TodoItem) -> TodoRepositoryResult<TodoItem>;

    /// Finds an item by identifier.
    ///
    /// Returns `None` when the item does not exist.
    async fn find_by_id(&self, id: TodoItemId) -> TodoRepositoryResult<Option<TodoItem>>;

    /// Returns every stored item ordered by identifier.
    async fn find_all(&self) -> TodoRepositoryResult<Vec<TodoItem>>;

    /// Returns all items currently stored with the given status.
    async fn find_by_status(&self, status: TodoStatus) -> TodoRepositoryResult<Vec<TodoItem>>;

    /// Returns items with the given status whose due time is strictly before
    /// `before`.
    async fn find_by_status_and_due_before(
        &self,
        status: TodoStatus,
        before: DateTime<Utc>,
    ) -> TodoRepositoryResult<Vec<TodoItem>>;
}

/// Errors returned by todo repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
