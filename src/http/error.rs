//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::RepositoryError;
use crate::services::{LifecycleError, MonthViewError};

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Lifecycle error, mapped per variant
    Lifecycle(LifecycleError),
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Lifecycle(e) => lifecycle_response(e),
            AppError::Repository(e) => repository_response(e),
        };

        (status, Json(error)).into_response()
    }
}

fn lifecycle_response(err: LifecycleError) -> (StatusCode, ApiError) {
    let message = err.to_string();
    match err {
        LifecycleError::NotFound(_) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message)),
        LifecycleError::UnknownCatalogItem(_) => (
            StatusCode::BAD_REQUEST,
            ApiError::new("UNKNOWN_CATALOG_ITEM", message),
        ),
        LifecycleError::TerminalState { .. } => (
            StatusCode::CONFLICT,
            ApiError::new("TERMINAL_STATE", message),
        ),
        LifecycleError::AvailabilityConflict { conflicting } => {
            let details = serde_json::to_value(&conflicting).unwrap_or(serde_json::Value::Null);
            (
                StatusCode::CONFLICT,
                ApiError::new("AVAILABILITY_CONFLICT", message).with_details(details),
            )
        }
        LifecycleError::InvalidInitialStatus(_)
        | LifecycleError::InvalidTransition { .. }
        | LifecycleError::MissingCancelReason
        | LifecycleError::EmptyVenues
        | LifecycleError::Pricing(_) => {
            (StatusCode::BAD_REQUEST, ApiError::new("VALIDATION", message))
        }
        LifecycleError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("STORAGE_ERROR", message),
        ),
    }
}

fn repository_response(err: RepositoryError) -> (StatusCode, ApiError) {
    let message = err.to_string();
    match err {
        RepositoryError::NotFound(_) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message)),
        RepositoryError::Conflict { conflicting } => {
            let details = serde_json::to_value(&conflicting).unwrap_or(serde_json::Value::Null);
            (
                StatusCode::CONFLICT,
                ApiError::new("AVAILABILITY_CONFLICT", message).with_details(details),
            )
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("REPOSITORY_ERROR", message),
        ),
    }
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        AppError::Lifecycle(err)
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<MonthViewError> for AppError {
    fn from(err: MonthViewError) -> Self {
        match err {
            MonthViewError::Calendar(e) => AppError::BadRequest(e.to_string()),
            MonthViewError::Storage(e) => AppError::Repository(e),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
