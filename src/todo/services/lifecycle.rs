//! Service layer for todo item creation, lookup, edits, and overdue sweeps.

use crate::todo::{
    domain::{
        RequestedStatus, TodoDescription, TodoDomainError, TodoItem, TodoItemChanges, TodoItemId,
        TodoStatus,
    },
    ports::{OverdueSweep, OverdueSweepReport, TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Request payload for creating a todo item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodoItemRequest {
    description: String,
    due_at: DateTime<Utc>,
}

impl CreateTodoItemRequest {
    /// Creates a request with the required item fields.
    #[must_use]
    pub fn new(description: impl Into<String>, due_at: DateTime<Utc>) -> Self {
        Self {
            description: description.into(),
            due_at,
        }
    }
}

/// Request payload for partially updating a todo item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodoItemRequest {
    id: TodoItemId,
    description: Option<String>,
    status: Option<RequestedStatus>,
}

impl UpdateTodoItemRequest {
    /// Creates an update request that changes nothing yet.
    #[must_use]
    pub const fn new(id: TodoItemId) -> Self {
        Self {
            id,
            description: None,
            status: None,
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the requested status.
    #[must_use]
    pub const fn with_status(mut self, status: RequestedStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// An item read through [`TodoLifecycleService::fetch_with_fresh_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshTodoItem {
    /// The item with an up-to-date status.
    pub item: TodoItem,
    /// `true` when the read promoted the item to past due and persisted it.
    pub corrected: bool,
}

/// Service-level errors for todo lifecycle operations.
#[derive(Debug, Error)]
pub enum TodoLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TodoRepositoryError),
    /// No item exists with the given identifier.
    #[error("todo item with id {0} not found")]
    NotFound(TodoItemId),
    /// The item is past due and cannot be edited.
    #[error("cannot edit past due todo item with id {0}")]
    EditRejected(TodoItemId),
}

/// Result type for todo lifecycle service operations.
pub type TodoLifecycleResult<T> = Result<T, TodoLifecycleError>;

/// Todo lifecycle orchestration service.
///
/// The only component that writes item status. Reads of single items and of
/// the full list correct overdue items on the way out; the not-done listing
/// does not.
#[derive(Clone)]
pub struct TodoLifecycleService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TodoLifecycleService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new todo lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and persists a new item.
    ///
    /// Items whose due time is not after the creation time start past due.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::Domain`] for a blank description or
    /// [`TodoLifecycleError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateTodoItemRequest) -> TodoLifecycleResult<TodoItem> {
        let description = TodoDescription::new(request.description)?;
        let item = TodoItem::new(description, request.due_at, &*self.clock);
        let saved = self.repository.save(item).await?;
        debug!(id = ?saved.id(), status = %saved.status(), "created todo item");
        Ok(saved)
    }

    /// Fetches an item, promoting and persisting it first when it is overdue.
    ///
    /// This is a read with a write side effect: the returned
    /// [`FreshTodoItem::corrected`] flag reports whether the write happened.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::NotFound`] when no item has the given ID,
    /// or repository errors from the lookup or the correction write.
    pub async fn fetch_with_fresh_status(
        &self,
        id: TodoItemId,
    ) -> TodoLifecycleResult<FreshTodoItem> {
        let item = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TodoLifecycleError::NotFound(id))?;
        Ok(self.refresh(item).await?)
    }

    /// Fetches an item with an up-to-date status.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_with_fresh_status`].
    pub async fn get_by_id(&self, id: TodoItemId) -> TodoLifecycleResult<TodoItem> {
        Ok(self.fetch_with_fresh_status(id).await?.item)
    }

    /// Lists items stored as not done, as of their last write.
    ///
    /// Overdue items are returned unchanged and nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn list_not_done(&self) -> TodoLifecycleResult<Vec<TodoItem>> {
        Ok(self.repository.find_by_status(TodoStatus::NotDone).await?)
    }

    /// Lists all items, correcting each overdue one before returning.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the lookup or any correction
    /// write.
    pub async fn list_all(&self) -> TodoLifecycleResult<Vec<TodoItem>> {
        let items = self.repository.find_all().await?;
        let mut refreshed = Vec::with_capacity(items.len());
        for item in items {
            refreshed.push(self.refresh(item).await?.item);
        }
        Ok(refreshed)
    }

    /// Applies a partial update to a not yet past-due item.
    ///
    /// The item is read through [`Self::fetch_with_fresh_status`], so an item
    /// that expired since its last write is corrected and then rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::Domain`] for a blank description,
    /// [`TodoLifecycleError::NotFound`] for an unknown ID,
    /// [`TodoLifecycleError::EditRejected`] when the item is past due, or
    /// repository errors.
    pub async fn update(&self, request: UpdateTodoItemRequest) -> TodoLifecycleResult<TodoItem> {
        let UpdateTodoItemRequest {
            id,
            description,
            status,
        } = request;
        let changes = TodoItemChanges {
            description: description.map(TodoDescription::new).transpose()?,
            status,
        };

        let mut item = self.fetch_with_fresh_status(id).await?.item;
        item.apply_changes(changes, &*self.clock)
            .map_err(|err| match err {
                TodoDomainError::PastDueLocked => TodoLifecycleError::EditRejected(id),
                other => TodoLifecycleError::Domain(other),
            })?;

        let saved = self.repository.save(item).await?;
        debug!(%id, status = %saved.status(), "updated todo item");
        Ok(saved)
    }

    /// Promotes every not-done item due at or before now to past due.
    ///
    /// Each promotion is persisted independently; a failed write is logged
    /// and counted without stopping the rest of the batch.
    ///
    /// # Errors
    ///
    /// Returns [`TodoLifecycleError::Repository`] when the candidate lookup
    /// fails.
    pub async fn run_overdue_sweep(&self) -> TodoLifecycleResult<OverdueSweepReport> {
        Ok(self.sweep().await?)
    }

    async fn sweep(&self) -> TodoRepositoryResult<OverdueSweepReport> {
        // The store query is strict, so shift the bound to include items due
        // exactly now.
        let cutoff = self.clock.utc() + TimeDelta::milliseconds(1);
        let candidates = self
            .repository
            .find_by_status_and_due_before(TodoStatus::NotDone, cutoff)
            .await?;

        let mut report = OverdueSweepReport::default();
        for mut item in candidates {
            if !item.refresh_status(&*self.clock) {
                continue;
            }
            let id = item.id();
            match self.repository.save(item).await {
                Ok(saved) => {
                    report.promoted += 1;
                    debug!(id = ?saved.id(), "marked overdue todo item as past due");
                }
                Err(err) => {
                    report.failed += 1;
                    warn!(id = ?id, error = %err, "failed to persist overdue todo item");
                }
            }
        }
        Ok(report)
    }

    async fn refresh(&self, mut item: TodoItem) -> TodoRepositoryResult<FreshTodoItem> {
        if !item.refresh_status(&*self.clock) {
            return Ok(FreshTodoItem {
                item,
                corrected: false,
            });
        }
        let saved = self.repository.save(item).await?;
        debug!(id = ?saved.id(), "marked todo item as past due on read");
        Ok(FreshTodoItem {
            item: saved,
            corrected: true,
        })
    }
}

#[async_trait]
impl<R, C> OverdueSweep for TodoLifecycleService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    async fn run_overdue_sweep(&self) -> TodoRepositoryResult<OverdueSweepReport> {
        self.sweep().await
    }
}
