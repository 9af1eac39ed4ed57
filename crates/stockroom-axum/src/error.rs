//! Axum-specific error types and mappings.
//!
//! Maps `ArticleError` onto HTTP status codes and the `{"message": ...}`
//! error body. Store failures were already logged by the service; only
//! their generic message reaches the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use stockroom_core::ArticleError;
use thiserror::Error;

use crate::response::json_bytes;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input or uniqueness violation).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The request was refused before reaching a handler (bad path
    /// parameter, oversized body, unsupported method).
    #[error("Rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
}

impl HttpError {
    /// Status code for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
        }
    }

    /// Message shown to the caller.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::BadRequest(msg)
            | Self::Internal(msg)
            | Self::Rejected { message: msg, .. } => msg,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message(),
        };
        // A struct with one string field always serializes
        let bytes = serde_json::to_vec(&body).unwrap_or_default();
        json_bytes(self.status(), bytes)
    }
}

impl From<ArticleError> for HttpError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::MalformedBody(_) | ArticleError::AlreadyExists(_) => {
                Self::BadRequest(err.to_string())
            }
            ArticleError::NotFound(_) => Self::NotFound(err.to_string()),
            ArticleError::Store(_) => Self::Internal(err.to_string()),
        }
    }
}
