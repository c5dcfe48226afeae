//! JSON request and response bodies for the todo HTTP API.

use crate::todo::domain::{RequestedStatus, TodoItem, TodoStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/todos`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoItemBody {
    /// Item description; must not be blank.
    pub description: String,
    /// Due time as an RFC 3339 timestamp.
    pub due_date_time: DateTime<Utc>,
}

/// Status values accepted by `PATCH /api/todos/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateStatusBody {
    /// Mark the item done.
    Done,
    /// Re-open the item.
    NotDone,
}

impl From<UpdateStatusBody> for RequestedStatus {
    fn from(value: UpdateStatusBody) -> Self {
        match value {
            UpdateStatusBody::Done => Self::Done,
            UpdateStatusBody::NotDone => Self::NotDone,
        }
    }
}

/// Body of `PATCH /api/todos/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTodoItemBody {
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Requested status.
    #[serde(default)]
    pub status: Option<UpdateStatusBody>,
}

impl UpdateTodoItemBody {
    /// Returns `true` when neither field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none() && self.status.is_none()
    }
}

/// Query string of `GET /api/todos`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTodoItemsQuery {
    /// Include done and past-due items.
    #[serde(default)]
    pub include_all: bool,
}

/// Item representation returned by every todo endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemResponse {
    /// Store-assigned identifier.
    pub id: Option<i64>,
    /// Item description.
    pub description: String,
    /// Human-readable status label.
    pub status: &'static str,
    /// Creation time.
    pub creation_date_time: DateTime<Utc>,
    /// Due time.
    pub due_date_time: DateTime<Utc>,
    /// Completion time, present only for done items.
    pub done_date_time: Option<DateTime<Utc>>,
}

impl From<&TodoItem> for TodoItemResponse {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id().map(|id| id.value()),
            description: item.description().as_str().to_owned(),
            status: status_label(item.status()),
            creation_date_time: item.created_at(),
            due_date_time: item.due_at(),
            done_date_time: item.done_at(),
        }
    }
}

impl From<TodoItem> for TodoItemResponse {
    fn from(item: TodoItem) -> Self {
        Self::from(&item)
    }
}

/// Returns the wire label for `status`.
#[must_use]
pub const fn status_label(status: TodoStatus) -> &'static str {
    match status {
        TodoStatus::NotDone => "not done",
        TodoStatus::Done => "done",
        TodoStatus::PastDue => "past due",
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: &'static str,
}
