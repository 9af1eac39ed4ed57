//! JSON response helpers.
//!
//! Every response carries `application/json; charset=utf-8`, including
//! bodiless 201 and 204 responses.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::HttpError;

/// Content type set on every response.
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Build a response from already-encoded JSON bytes.
pub fn json_bytes(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
        body,
    )
        .into_response()
}

/// A bodiless response that still declares the JSON content type.
pub fn empty(status: StatusCode) -> Response {
    json_bytes(status, Vec::new())
}

/// Pretty-printed JSON response with status 200.
///
/// Like `axum::Json`, but indented with two spaces and with an explicit
/// UTF-8 charset.
#[derive(Debug, Clone)]
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec_pretty(&self.0) {
            Ok(body) => json_bytes(StatusCode::OK, body),
            Err(e) => {
                tracing::error!(target: "stockroom.http", error = %e, "Failed to encode response");
                HttpError::Internal("Serialization error".to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_pretty_json_is_indented() {
        let response = PrettyJson(serde_json::json!({"articulo": "X1"})).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_UTF8);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"{\n  \"articulo\": \"X1\"\n}");
    }

    #[test]
    fn test_empty_sets_content_type() {
        let response = empty(StatusCode::NO_CONTENT);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_UTF8);
    }
}
