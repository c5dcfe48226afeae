//! HTTP surface for the todo lifecycle service.
//!
//! Handlers translate JSON bodies into service requests and map
//! [`TodoLifecycleError`](crate::todo::services::TodoLifecycleError) values
//! onto status codes:
//!
//! - validation failures and malformed bodies: `400`
//! - unknown item: `404`
//! - edit of a past-due item: `422`
//! - storage failures: `500` with a generic message

pub mod dto;
pub mod error;
pub mod handlers;

use crate::todo::{ports::TodoRepository, services::TodoLifecycleService};
use axum::{
    Router,
    routing::{get, post},
};
use mockable::Clock;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Builds the application router around `service`.
pub fn router<R, C>(service: Arc<TodoLifecycleService<R, C>>) -> Router
where
    R: TodoRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/api/todos",
            post(handlers::create_todo_item::<R, C>).get(handlers::list_todo_items::<R, C>),
        )
        .route(
            "/api/todos/:id",
            get(handlers::get_todo_item::<R, C>).patch(handlers::update_todo_item::<R, C>),
        )
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
