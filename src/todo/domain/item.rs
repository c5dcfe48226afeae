//! Todo item aggregate and its edit payload.

use super::{RequestedStatus, StatusTrigger, TodoDescription, TodoDomainError, TodoItemId, TodoStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Todo item aggregate root.
///
/// `done_at` is kept in step with `status`: it is `Some` exactly when the
/// item is [`TodoStatus::Done`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    id: Option<TodoItemId>,
    description: TodoDescription,
    status: TodoStatus,
    created_at: DateTime<Utc>,
    due_at: DateTime<Utc>,
    done_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTodoItemData {
    /// Persisted item identifier.
    pub id: TodoItemId,
    /// Persisted description.
    pub description: TodoDescription,
    /// Persisted lifecycle status.
    pub status: TodoStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted due timestamp.
    pub due_at: DateTime<Utc>,
    /// Persisted completion timestamp, if any.
    pub done_at: Option<DateTime<Utc>>,
}

/// Requested edits to a todo item. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoItemChanges {
    /// Replacement description.
    pub description: Option<TodoDescription>,
    /// Requested status.
    pub status: Option<RequestedStatus>,
}

impl TodoItemChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: TodoDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the requested status.
    #[must_use]
    pub const fn with_status(mut self, status: RequestedStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none() && self.status.is_none()
    }
}

impl TodoItem {
    /// Creates a new, not yet persisted item.
    ///
    /// The status is derived from the due time against the clock's current
    /// time via [`TodoStatus::initial`].
    #[must_use]
    pub fn new(description: TodoDescription, due_at: DateTime<Utc>, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            id: None,
            description,
            status: TodoStatus::initial(due_at, now),
            created_at: now,
            due_at,
            done_at: None,
        }
    }

    /// Reconstructs an item from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTodoItemData) -> Self {
        Self {
            id: Some(data.id),
            description: data.description,
            status: data.status,
            created_at: data.created_at,
            due_at: data.due_at,
            done_at: data.done_at,
        }
    }

    /// Returns the item with the store-assigned identifier attached.
    #[must_use]
    pub fn with_id(mut self, id: TodoItemId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns the identifier, or `None` before first persistence.
    #[must_use]
    pub const fn id(&self) -> Option<TodoItemId> {
        self.id
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TodoDescription {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TodoStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the due timestamp.
    #[must_use]
    pub const fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    /// Returns the completion timestamp, if the item is done.
    #[must_use]
    pub const fn done_at(&self) -> Option<DateTime<Utc>> {
        self.done_at
    }

    /// Returns `true` when the item is not done and its due time is not after
    /// `now`.
    #[must_use]
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.status == TodoStatus::NotDone && self.due_at <= now
    }

    /// Promotes an overdue not-done item to past due.
    ///
    /// Returns `true` when the status changed and the item must be persisted.
    pub fn refresh_status(&mut self, clock: &impl Clock) -> bool {
        if !self.is_overdue_at(clock.utc()) {
            return false;
        }
        self.apply_trigger(StatusTrigger::DueElapsed, clock)
    }

    /// Applies requested edits.
    ///
    /// Marking done stamps `done_at` with the current time; re-opening clears
    /// it. An empty change set leaves the item untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::PastDueLocked`] when the item is past due;
    /// the item is not modified in that case.
    pub fn apply_changes(
        &mut self,
        changes: TodoItemChanges,
        clock: &impl Clock,
    ) -> Result<(), TodoDomainError> {
        if self.status.is_terminal() {
            return Err(TodoDomainError::PastDueLocked);
        }
        let TodoItemChanges {
            description,
            status,
        } = changes;
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(requested) = status {
            self.apply_trigger(requested.trigger(), clock);
        }
        Ok(())
    }

    fn apply_trigger(&mut self, trigger: StatusTrigger, clock: &impl Clock) -> bool {
        let Some(next) = self.status.transition(trigger) else {
            return false;
        };
        self.done_at = match next {
            TodoStatus::Done => Some(clock.utc()),
            TodoStatus::NotDone | TodoStatus::PastDue => None,
        };
        self.status = next;
        true
    }
}
