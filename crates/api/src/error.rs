//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Every failure body has the shape
//! `{"error": message}`; 5xx messages are sanitized, with the underlying
//! error going to the logs only.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::orders::OrderError;

/// Application-level error type for the service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order workflow failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(err) => match err {
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::InvalidEmail(_) | AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::Hash(_) | AuthError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Order(err) => match err {
                OrderError::CartNotFound(_) => StatusCode::NOT_FOUND,
                OrderError::EmptyCart(_) => StatusCode::BAD_REQUEST,
                OrderError::MenuItemVanished(_) => StatusCode::CONFLICT,
                OrderError::TotalOverflow | OrderError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Server errors never leak store internals.
    fn message(&self) -> String {
        if self.status() == StatusCode::INTERNAL_SERVER_ERROR {
            return "internal server error".to_owned();
        }

        match self {
            Self::Database(err) => err.to_string(),
            Self::Auth(err) => err.to_string(),
            Self::Order(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::BadRequest(msg) => msg.clone(),
            // Unreachable: every Internal is a 500, handled above.
            Self::Internal(_) => "internal server error".to_owned(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
