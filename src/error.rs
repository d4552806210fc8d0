// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Geolocation unavailable: {0}")]
    GeolocationUnavailable(String),

    #[error("Invalid workout input: {0}")]
    Validation(String),

    #[error("Cannot {action} while {state}")]
    InvalidStateTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Session runtime has stopped")]
    SessionClosed,
}

impl AppError {
    /// Notice shown for any rejected workout form.
    pub const INVALID_INPUT_NOTICE: &'static str = "Expected numerical values";

    /// Whether the user can correct the problem and try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::BadRequest(_))
    }

    /// The user-visible notice for this error, if it has one.
    ///
    /// Invalid transitions are internal and never reach the user.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            AppError::Validation(_) => Some(Self::INVALID_INPUT_NOTICE),
            AppError::GeolocationUnavailable(_) => Some(GEOLOCATION_NOTICE),
            _ => None,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        AppError::BadRequest(rejection.body_text())
    }
}

/// Notice shown when no position could be obtained.
pub const GEOLOCATION_NOTICE: &str = "Couldn't get your position";

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::GeolocationUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "geolocation_unavailable",
                Some(msg.clone()),
            ),
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                Some(msg.clone()),
            ),
            AppError::InvalidStateTransition { .. } => {
                (StatusCode::CONFLICT, "invalid_state", Some(self.to_string()))
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::SessionClosed => {
                tracing::error!("Session runtime is not accepting events");
                (StatusCode::SERVICE_UNAVAILABLE, "session_closed", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
