//! In-memory repository for todo lifecycle tests and local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::todo::{
    domain::{TodoItem, TodoItemId, TodoStatus},
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};

/// Thread-safe in-memory todo repository.
///
/// Identifiers are assigned from a monotonically increasing counter starting
/// at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    state: Arc<RwLock<InMemoryTodoState>>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    items: BTreeMap<TodoItemId, TodoItem>,
    last_id: i64,
}

impl InMemoryTodoState {
    fn assign_id(&mut self) -> TodoRepositoryResult<TodoItemId> {
        let next = self.last_id + 1;
        let id = TodoItemId::new(next).map_err(TodoRepositoryError::persistence)?;
        self.last_id = next;
        Ok(id)
    }
}

impl InMemoryTodoRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TodoRepositoryResult<RwLockReadGuard<'_, InMemoryTodoState>> {
        self.state.read().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TodoRepositoryResult<RwLockWriteGuard<'_, InMemoryTodoState>> {
        self.state.write().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Collects clones of the stored items matching `predicate`, in ID order.
fn collect_matching(
    state: &InMemoryTodoState,
    predicate: impl Fn(&TodoItem) -> bool,
) -> Vec<TodoItem> {
    state
        .items
        .values()
        .filter(|item| predicate(item))
        .cloned()
        .collect()
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn save(&self, item: TodoItem) -> TodoRepositoryResult<TodoItem> {
        let mut state = self.write()?;
        let (id, stored) = match item.id() {
            Some(id) => {
                // Keep the counter ahead of explicitly identified inserts.
                state.last_id = state.last_id.max(id.value());
                (id, item)
            }
            None => {
                let id = state.assign_id()?;
                (id, item.with_id(id))
            }
        };
        state.items.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TodoItemId) -> TodoRepositoryResult<Option<TodoItem>> {
        let state = self.read()?;
        Ok(state.items.get(&id).cloned())
    }

    async fn find_all(&self) -> TodoRepositoryResult<Vec<TodoItem>> {
        let state = self.read()?;
        Ok(collect_matching(&state, |_| true))
    }

    async fn find_by_status(&self, status: TodoStatus) -> TodoRepositoryResult<Vec<TodoItem>> {
        let state = self.read()?;
        Ok(collect_matching(&state, |item| item.status() == status))
    }

    async fn find_by_status_and_due_before(
        &self,
        status: TodoStatus,
        before: DateTime<Utc>,
    ) -> TodoRepositoryResult<Vec<TodoItem>> {
        let state = self.read()?;
        Ok(collect_matching(&state, |item| {
            item.status() == status && item.due_at() < before
        }))
    }
}
