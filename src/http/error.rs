//! Mapping of service errors onto HTTP responses.
//!
//! Client errors carry their message in the body. Unclassified failures are
//! logged with full detail and answered with a generic message.

use crate::task::{domain::TaskDomainError, services::TaskLifecycleError};
use crate::workspace::WorkspaceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The task lifecycle rejected the request or failed.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),

    /// An instruction path was rejected by the workspace.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// The path parameter is not a task identifier.
    #[error(transparent)]
    InvalidId(#[from] TaskDomainError),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Lifecycle(err) if err.is_not_found() => {
                (StatusCode::NOT_FOUND, "Task not found".to_owned())
            }
            Self::Lifecycle(err) if err.is_invalid_transition() => {
                (StatusCode::CONFLICT, err.to_string())
            }
            Self::Workspace(err) if err.is_rejected_path() => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::InvalidId(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Lifecycle(err) => {
                error!(error = %err, "task lifecycle failure");
                internal()
            }
            Self::Workspace(err) => {
                error!(error = %err, "workspace failure");
                internal()
            }
        }
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error".to_owned(),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
