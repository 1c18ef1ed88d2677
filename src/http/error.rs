//! Mapping from service errors to JSON error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use super::handlers::MessageBody;
use crate::task::{domain::TaskDomainError, services::TaskServiceError};

/// Error response rendered as `{"message": ...}` with a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Message returned for opaque server failures.
    pub const INTERNAL_MESSAGE: &'static str = "Internal Server Error";

    /// Creates an error response.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 with the given message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 with the given message.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 with the opaque internal message.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, Self::INTERNAL_MESSAGE)
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(MessageBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::EmptyTitle => Self::bad_request("Title is required"),
            TaskDomainError::TitleTooLong { max, .. } => {
                Self::bad_request(format!("Title must be at most {max} characters"))
            }
            nul @ TaskDomainError::NulCharacter { .. } => Self::bad_request(nul.to_string()),
            TaskDomainError::InvalidTaskId(_) => Self::not_found("Task not found"),
            TaskDomainError::TaskCompleted(_) => {
                Self::not_found("Task not found or already completed")
            }
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Domain(domain) => domain.into(),
            TaskServiceError::NotFound(_) => Self::not_found("Task not found"),
            TaskServiceError::NotEditable(_) => {
                Self::not_found("Task not found or already completed")
            }
            TaskServiceError::Repository(cause) => {
                error!(error = %cause, "task store failure");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection, "rejected request body");
        Self::bad_request(rejection.body_text())
    }
}
