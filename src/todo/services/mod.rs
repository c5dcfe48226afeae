//! Application services for todo lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTodoItemRequest, FreshTodoItem, TodoLifecycleError, TodoLifecycleResult,
    TodoLifecycleService, UpdateTodoItemRequest,
};
