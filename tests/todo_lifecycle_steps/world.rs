//! Shared world state for todo lifecycle BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rstest::fixture;
use todo_lifecycle::todo::{
    adapters::memory::{InMemoryTodoRepository, ManualClock},
    domain::TodoItem,
    ports::OverdueSweepReport,
    services::{FreshTodoItem, TodoLifecycleError, TodoLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTodoService = TodoLifecycleService<InMemoryTodoRepository, ManualClock>;

/// Scenario world for todo lifecycle behaviour tests.
pub struct TodoWorld {
    pub service: TestTodoService,
    pub clock: ManualClock,
    pub last_item: Option<TodoItem>,
    pub last_fetch: Option<FreshTodoItem>,
    pub last_update: Option<Result<TodoItem, TodoLifecycleError>>,
    pub last_report: Option<OverdueSweepReport>,
}

impl TodoWorld {
    /// Creates a world over an empty store with the clock at the Unix epoch.
    #[must_use]
    pub fn new() -> Self {
        let clock = ManualClock::new(DateTime::<Utc>::UNIX_EPOCH);
        let service = TodoLifecycleService::new(
            Arc::new(InMemoryTodoRepository::new()),
            Arc::new(clock.clone()),
        );

        Self {
            service,
            clock,
            last_item: None,
            last_fetch: None,
            last_update: None,
            last_report: None,
        }
    }
}

impl Default for TodoWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TodoWorld {
    TodoWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses an RFC 3339 timestamp from a step argument.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, eyre::Report> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| eyre::eyre!("invalid timestamp '{raw}' in scenario: {err}"))
}
