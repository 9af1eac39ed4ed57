//! Shared helpers for stockroom-axum integration tests.

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use stockroom_axum::bootstrap::{CorsConfig, bootstrap_with_store};
use stockroom_axum::routes::create_router;
use stockroom_db::{SqliteDocumentStore, setup_test_store};

/// Collection used by every test router.
pub const TEST_COLLECTION: &str = "articles";

/// A router over a fresh in-memory store, plus the store for poking at it.
pub async fn test_app() -> (Router, SqliteDocumentStore) {
    let store = setup_test_store().await.expect("in-memory store");
    let ctx = bootstrap_with_store(store.clone(), TEST_COLLECTION)
        .await
        .expect("bootstrap");
    (create_router(ctx, &CorsConfig::AllowAll), store)
}

/// A response reduced to the parts tests look at.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "body is not JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Send one request through a clone of `app`.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body,
    }
}
