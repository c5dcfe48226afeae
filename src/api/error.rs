//! HTTP error responses for the todo API.

use crate::todo::services::TodoLifecycleError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{error, info};

/// Message returned for any storage failure. Details are only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Error returned by todo HTTP handlers.
///
/// Carries the request path so the JSON body can echo it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    detail: Option<String>,
    path: String,
}

impl ApiError {
    /// Creates an error with a client-visible message.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
            path: path.into(),
        }
    }

    /// Creates a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, path)
    }

    /// Maps a service error onto its HTTP status.
    #[must_use]
    pub fn from_lifecycle(err: &TodoLifecycleError, path: impl Into<String>) -> Self {
        match err {
            TodoLifecycleError::Domain(_) => Self::bad_request(err.to_string(), path),
            TodoLifecycleError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, err.to_string(), path)
            }
            TodoLifecycleError::EditRejected(_) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string(), path)
            }
            TodoLifecycleError::Repository(_) => Self {
                detail: Some(err.to_string()),
                ..Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE, path)
            },
        }
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the client-visible message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    fn log(&self) {
        let detail = self.detail.as_deref().unwrap_or(&self.message);
        if self.status.is_server_error() {
            error!(status = %self.status, path = %self.path, error = %detail, "server error during request");
        } else {
            info!(status = %self.status, path = %self.path, error = %detail, "client error during request");
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorBody {
    timestamp: String,
    status: u16,
    error: &'static str,
    message: String,
    path: String,
}

impl ErrorBody {
    fn new(err: ApiError, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            status: err.status.as_u16(),
            error: err.status.canonical_reason().unwrap_or("Unknown Status"),
            message: err.message,
            path: err.path,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status;
        (status, Json(ErrorBody::new(self, Utc::now()))).into_response()
    }
}
