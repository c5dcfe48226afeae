//! Domain model for todo item lifecycle management.
//!
//! The todo domain owns the status state machine, creation-time status
//! derivation, and the edit restrictions on past-due items, keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod item;
mod status;

pub use error::{ParseTodoStatusError, TodoDomainError};
pub use ids::{TodoDescription, TodoItemId};
pub use item::{PersistedTodoItemData, TodoItem, TodoItemChanges};
pub use status::{RequestedStatus, StatusTrigger, TodoStatus};
