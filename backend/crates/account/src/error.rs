//! Account Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, field_errors::FieldErrors, kind::ErrorKind};
use platform::token::TokenError;
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Message returned for every failed login, whatever the cause
pub const INVALID_CREDENTIALS_MESSAGE: &str = "No active account found with the given credentials";

/// Hint attached to every 401 response
pub const SIGN_IN_ACTION: &str = "Sign in again to obtain a new access token";

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// One or more request fields failed validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Unknown email, wrong password or inactive account
    #[error("No active account found with the given credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired or revoked token
    #[error("{0}")]
    Unauthenticated(&'static str),

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

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::Validation(_)
            | AccountError::InvalidCredentials
            | AccountError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AccountError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AccountError::Database(_) | AccountError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Validation(_)
            | AccountError::InvalidCredentials
            | AccountError::BadRequest(_) => ErrorKind::BadRequest,
            AccountError::Unauthenticated(_) => ErrorKind::Unauthorized,
            AccountError::Database(_) | AccountError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the log; the body only carries the kind.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::Validation(errors) => AppError::validation(errors.clone()),
            AccountError::InvalidCredentials => AppError::bad_request(INVALID_CREDENTIALS_MESSAGE),
            AccountError::Unauthenticated(reason) => {
                AppError::unauthorized(*reason).with_action(SIGN_IN_ACTION)
            }
            AccountError::Database(_) | AccountError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountError::Unauthenticated(reason) => {
                tracing::warn!(reason = %reason, "Rejected credentials");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        AccountError::Internal(err.to_string())
    }
}

impl From<TokenError> for AccountError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid(_) => {
                AccountError::Unauthenticated("Token is invalid or expired")
            }
            TokenError::Signing(_) | TokenError::WeakSecret => {
                AccountError::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AccountError {
    fn from(rejection: JsonRejection) -> Self {
        AccountError::BadRequest(rejection.body_text())
    }
}
