//! Route definitions and router construction.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Article routes.
///
/// Axum 0.8 uses brace syntax for path parameters: `{code}`, `{category}`.
/// `/articles/category/{category}` has more segments than `/articles/{code}`,
/// so the two never compete.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/articles",
            get(handlers::articles::list).post(handlers::articles::create),
        )
        .route(
            "/articles/{code}",
            get(handlers::articles::get)
                .put(handlers::articles::replace)
                .delete(handlers::articles::remove),
        )
        .route(
            "/articles/category/{category}",
            get(handlers::articles::list_by_category),
        )
}

/// Create the main Axum router with all routes, tracing and CORS applied.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes())
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_config))
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
