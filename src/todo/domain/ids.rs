//! Identifier and validated scalar types for the todo domain.

use super::TodoDomainError;
use std::fmt;

/// Store-assigned identifier of a persisted todo item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoItemId(i64);

impl TodoItemId {
    /// Creates a validated item identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidItemId`] when the value is zero or
    /// negative.
    pub const fn new(value: i64) -> Result<Self, TodoDomainError> {
        if value <= 0 {
            return Err(TodoDomainError::InvalidItemId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Todo item description that is not blank.
///
/// The text is kept exactly as given; surrounding whitespace only counts
/// toward the blank check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TodoDescription(String);

impl TodoDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyDescription`] when the value is empty
    /// or whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TodoDomainError::EmptyDescription);
        }
        Ok(Self(raw))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TodoDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TodoDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
