//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin wrappers that delegate to `ArticleService`.

pub mod articles;

use axum::http::StatusCode;

use crate::error::HttpError;

/// Fallback for paths no route matches.
pub async fn not_found() -> HttpError {
    HttpError::NotFound("Resource not found".to_string())
}

/// Fallback for known paths hit with a method they don't serve.
pub async fn method_not_allowed() -> HttpError {
    HttpError::Rejected {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: "Method not allowed".to_string(),
    }
}
