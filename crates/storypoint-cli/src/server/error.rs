//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use storypoint::{SchemaError, StorypointError};

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input from the form.
    BadRequest(String),
    /// The uploaded history failed validation.
    Unprocessable(String),
    /// The model provider failed or rejected the call.
    Upstream(String),
    /// Internal server error.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unprocessable(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_data", msg)
            }
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "provider_error", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        ApiError::Unprocessable(err.user_message())
    }
}

impl From<StorypointError> for ApiError {
    fn from(err: StorypointError) -> Self {
        match err {
            StorypointError::Api { .. } | StorypointError::Transport(_) => {
                ApiError::Upstream(format!("Error calling Gemini API: {}", err))
            }
            StorypointError::Config(msg) => ApiError::BadRequest(msg),
            StorypointError::Schema(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unprocessable(msg) => write!(f, "Invalid data: {}", msg),
            ApiError::Upstream(msg) => write!(f, "Provider error: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
