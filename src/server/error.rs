//! HTTP error payloads and mapping from domain errors.
//!
//! Handlers return `Result<_, ApiError>`; the kind-to-status mapping lives
//! here so endpoints never build status codes ad hoc. Error bodies are plain
//! text, matching the service's original wire contract.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Tagged request failure, mapped uniformly onto HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or empty required input.
    Validation(String),
    /// No matching item or photo.
    NotFound(String),
    /// Verb not supported on a matched resource path.
    MethodNotAllowed,
    /// Database or connectivity failure. Details are logged, never echoed.
    Storage(String),
}

impl ApiError {
    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new Storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }
}

impl From<stockpile_common::Error> for ApiError {
    fn from(err: stockpile_common::Error) -> Self {
        use stockpile_common::Error;
        match err {
            Error::NotFound(_) => Self::not_found("Not Found"),
            Error::InvalidInput(msg) => Self::Validation(msg),
            Error::Database(msg) => Self::Storage(msg),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::validation(format!("Malformed form data: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            Self::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response()
            }
            Self::Storage(detail) => {
                tracing::error!("Storage failure: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database Error").into_response()
            }
        }
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
