//! In-memory adapters for tests and database-less runs.

mod clock;
mod item;

pub use clock::ManualClock;
pub use item::InMemoryTodoRepository;
