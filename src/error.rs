// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseError;

/// Client-facing failure. Every variant renders as a `{code, data}` envelope
/// whose `code` mirrors the HTTP status.
#[derive(Debug)]
pub enum ApiError {
    // 403 Forbidden
    MissingApiKey,
    InvalidApiKey,

    // 500 Internal Server Error. The detail is for logs only.
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingApiKey => 403,
            ApiError::InvalidApiKey => 403,
            ApiError::Internal(_) => 500,
        }
    }

    /// Client-safe message placed in the envelope's `data` field
    pub fn message(&self) -> &str {
        match self {
            ApiError::MissingApiKey => "No api token",
            ApiError::InvalidApiKey => "Invalid api token",
            ApiError::Internal(_) => "Internal server error",
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "code": self.status_code(),
            "data": self.message(),
        })
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::Internal(detail.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Don't expose storage errors to clients
        tracing::error!("Database error: {}", err);
        ApiError::internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Internal(detail) => write!(f, "{}: {}", self.message(), detail),
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
