//! Axum handlers for the todo endpoints.

use super::{
    dto::{
        CreateTodoItemBody, HealthResponse, ListTodoItemsQuery, TodoItemResponse,
        UpdateTodoItemBody,
    },
    error::ApiError,
};
use crate::todo::{
    domain::TodoItemId,
    ports::TodoRepository,
    services::{CreateTodoItemRequest, TodoLifecycleService, UpdateTodoItemRequest},
};
use axum::{
    Json,
    extract::{
        OriginalUri, Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use mockable::Clock;
use std::sync::Arc;

/// Shared handler state.
pub type SharedTodoService<R, C> = Arc<TodoLifecycleService<R, C>>;

/// Message returned when a `PATCH` body carries no field to change.
pub const EMPTY_UPDATE_MESSAGE: &str =
    "At least one field (description or status) must be provided for update.";

/// Message returned when a create body has a blank description.
pub const BLANK_DESCRIPTION_MESSAGE: &str = "description must not be blank";

type ApiResult<T> = Result<T, ApiError>;

/// `POST /api/todos`
pub async fn create_todo_item<R, C>(
    State(service): State<SharedTodoService<R, C>>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<CreateTodoItemBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TodoItemResponse>)>
where
    R: TodoRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let path = uri.path();
    let Json(body) =
        payload.map_err(|rejection| ApiError::bad_request(rejection.body_text(), path))?;
    if body.description.trim().is_empty() {
        return Err(ApiError::bad_request(BLANK_DESCRIPTION_MESSAGE, path));
    }

    let created = service
        .create(CreateTodoItemRequest::new(body.description, body.due_date_time))
        .await
        .map_err(|err| ApiError::from_lifecycle(&err, path))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `GET /api/todos?includeAll=bool`
pub async fn list_todo_items<R, C>(
    State(service): State<SharedTodoService<R, C>>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<ListTodoItemsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TodoItemResponse>>>
where
    R: TodoRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let path = uri.path();
    let Query(query) =
        params.map_err(|rejection| ApiError::bad_request(rejection.body_text(), path))?;

    let items = if query.include_all {
        service.list_all().await
    } else {
        service.list_not_done().await
    }
    .map_err(|err| ApiError::from_lifecycle(&err, path))?;
    Ok(Json(items.iter().map(TodoItemResponse::from).collect()))
}

/// `GET /api/todos/{id}`
pub async fn get_todo_item<R, C>(
    State(service): State<SharedTodoService<R, C>>,
    OriginalUri(uri): OriginalUri,
    raw_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<TodoItemResponse>>
where
    R: TodoRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let path = uri.path();
    let id = parse_id(raw_id, path)?;
    let item = service
        .get_by_id(id)
        .await
        .map_err(|err| ApiError::from_lifecycle(&err, path))?;
    Ok(Json(item.into()))
}

/// `PATCH /api/todos/{id}`
pub async fn update_todo_item<R, C>(
    State(service): State<SharedTodoService<R, C>>,
    OriginalUri(uri): OriginalUri,
    raw_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTodoItemBody>, JsonRejection>,
) -> ApiResult<Json<TodoItemResponse>>
where
    R: TodoRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let path = uri.path();
    let id = parse_id(raw_id, path)?;
    let Json(body) =
        payload.map_err(|rejection| ApiError::bad_request(rejection.body_text(), path))?;
    if body.is_empty() {
        return Err(ApiError::bad_request(EMPTY_UPDATE_MESSAGE, path));
    }

    let mut request = UpdateTodoItemRequest::new(id);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(status) = body.status {
        request = request.with_status(status.into());
    }

    let updated = service
        .update(request)
        .await
        .map_err(|err| ApiError::from_lifecycle(&err, path))?;
    Ok(Json(updated.into()))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

fn parse_id(raw_id: Result<Path<i64>, PathRejection>, path: &str) -> ApiResult<TodoItemId> {
    let Path(raw) = raw_id.map_err(|rejection| ApiError::bad_request(rejection.body_text(), path))?;
    TodoItemId::new(raw).map_err(|err| ApiError::bad_request(err.to_string(), path))
}
