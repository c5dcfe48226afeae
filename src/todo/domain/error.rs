//! Error types for todo domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating domain todo values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The item description is empty or whitespace only.
    #[error("todo item description must not be empty")]
    EmptyDescription,

    /// The item identifier is not a positive integer.
    #[error("invalid todo item id {0}, expected a positive integer")]
    InvalidItemId(i64),

    /// The item is past due and no longer accepts edits.
    #[error("past due todo items cannot be edited")]
    PastDueLocked,
}

/// Error returned while parsing todo statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown todo status: {0}")]
pub struct ParseTodoStatusError(pub String);
