//! Shared test helpers for in-memory repository integration tests.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rstest::fixture;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use todo_lifecycle::todo::{
    adapters::memory::{InMemoryTodoRepository, ManualClock},
    domain::{TodoItem, TodoItemId, TodoStatus},
    ports::{TodoRepository, TodoRepositoryResult},
    services::TodoLifecycleService,
};

/// Service wired to a write-counting in-memory store.
pub type TestService = TodoLifecycleService<CountingRepository, ManualClock>;

/// In-memory repository that counts `save` calls.
#[derive(Debug, Clone, Default)]
pub struct CountingRepository {
    inner: InMemoryTodoRepository,
    saves: Arc<AtomicUsize>,
}

impl CountingRepository {
    /// Returns the number of writes made so far.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TodoRepository for CountingRepository {
    async fn save(&self, item: TodoItem) -> TodoRepositoryResult<TodoItem> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(item).await
    }

    async fn find_by_id(&self, id: TodoItemId) -> TodoRepositoryResult<Option<TodoItem>> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> TodoRepositoryResult<Vec<TodoItem>> {
        self.inner.find_all().await
    }

    async fn find_by_status(&self, status: TodoStatus) -> TodoRepositoryResult<Vec<TodoItem>> {
        self.inner.find_by_status(status).await
    }

    async fn find_by_status_and_due_before(
        &self,
        status: TodoStatus,
        before: DateTime<Utc>,
    ) -> TodoRepositoryResult<Vec<TodoItem>> {
        self.inner
            .find_by_status_and_due_before(status, before)
            .await
    }
}

/// Everything a lifecycle test needs to drive and observe the service.
pub struct Harness {
    pub service: TestService,
    pub repository: CountingRepository,
    pub clock: ManualClock,
}

/// Fixed start instant for every harness clock.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Provides a service over a fresh store with the clock at [`start_time`].
#[fixture]
pub fn harness() -> Harness {
    let repository = CountingRepository::default();
    let clock = ManualClock::new(start_time());
    let service = TodoLifecycleService::new(Arc::new(repository.clone()), Arc::new(clock.clone()));
    Harness {
        service,
        repository,
        clock,
    }
}
