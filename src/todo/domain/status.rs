//! Todo item status state machine.

use super::ParseTodoStatusError;
use chrono::{DateTime, Utc};
use std::fmt;

/// Todo item lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoStatus {
    /// Item is open and its due time has not been observed to elapse.
    NotDone,
    /// Item has been completed.
    Done,
    /// Item's due time elapsed while it was not done. Terminal.
    PastDue,
}

/// Event that may move an item between statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTrigger {
    /// Explicit update marking the item done.
    MarkDone,
    /// Explicit update re-opening the item.
    MarkNotDone,
    /// A read or sweep observed the due time as not after now.
    DueElapsed,
}

impl TodoStatus {
    /// Derives the status of an item created at `now` with the given due time.
    ///
    /// A due time that is not strictly after `now` produces
    /// [`TodoStatus::PastDue`].
    #[must_use]
    pub fn initial(due_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if due_at > now {
            Self::NotDone
        } else {
            Self::PastDue
        }
    }

    /// Returns the status reached by applying `trigger`, or `None` when the
    /// trigger has no effect from this status.
    ///
    /// `PastDue` has no outbound transitions. `DueElapsed` only affects
    /// `NotDone`, so done items never become past due.
    #[must_use]
    pub const fn transition(self, trigger: StatusTrigger) -> Option<Self> {
        match (self, trigger) {
            (Self::PastDue, _) | (Self::Done, StatusTrigger::DueElapsed) => None,
            (Self::NotDone, StatusTrigger::DueElapsed) => Some(Self::PastDue),
            (_, StatusTrigger::MarkDone) => Some(Self::Done),
            (_, StatusTrigger::MarkNotDone) => Some(Self::NotDone),
        }
    }

    /// Returns `true` when no trigger can leave this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::PastDue)
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotDone => "not_done",
            Self::Done => "done",
            Self::PastDue => "past_due",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TodoStatus {
    type Error = ParseTodoStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "not_done" => Ok(Self::NotDone),
            "done" => Ok(Self::Done),
            "past_due" => Ok(Self::PastDue),
            _ => Err(ParseTodoStatusError(value.to_owned())),
        }
    }
}

/// Status a client may request through an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestedStatus {
    /// Mark the item done.
    Done,
    /// Re-open the item.
    NotDone,
}

impl RequestedStatus {
    /// Returns the state machine trigger for this request.
    #[must_use]
    pub const fn trigger(self) -> StatusTrigger {
        match self {
            Self::Done => StatusTrigger::MarkDone,
            Self::NotDone => StatusTrigger::MarkNotDone,
        }
    }
}
