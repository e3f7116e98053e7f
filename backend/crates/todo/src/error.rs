//! ToDo Error Types
//!
//! This module provides to-do-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, field_errors::FieldErrors, kind::ErrorKind};
use thiserror::Error;

/// ToDo-specific result type alias
pub type TodoResult<T> = Result<T, TodoError>;

/// ToDo-specific error variants
#[derive(Debug, Error)]
pub enum TodoError {
    /// One or more request fields failed validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// No to-do with the requested id (or not visible to the caller)
    #[error("ToDo not found")]
    NotFound,

    /// Malformed request body
    #[error("{0}")]
    BadRequest(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TodoError::Validation(_) | TodoError::BadRequest(_) => StatusCode::BAD_REQUEST,
            TodoError::NotFound => StatusCode::NOT_FOUND,
            TodoError::Database(_) | TodoError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Validation(_) | TodoError::BadRequest(_) => ErrorKind::BadRequest,
            TodoError::NotFound => ErrorKind::NotFound,
            TodoError::Database(_) | TodoError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            TodoError::Validation(errors) => AppError::validation(errors.clone()),
            TodoError::Database(_) | TodoError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            TodoError::Database(e) => {
                tracing::error!(error = %e, "ToDo database error");
            }
            TodoError::Internal(msg) => {
                tracing::error!(message = %msg, "ToDo internal error");
            }
            _ => {
                tracing::debug!(error = %self, "ToDo error");
            }
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for TodoError {
    fn from(err: AppError) -> Self {
        TodoError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for TodoError {
    fn from(rejection: JsonRejection) -> Self {
        TodoError::BadRequest(rejection.body_text())
    }
}

/// An id segment that is not a UUID cannot name any to-do
impl From<PathRejection> for TodoError {
    fn from(_: PathRejection) -> Self {
        TodoError::NotFound
    }
}
