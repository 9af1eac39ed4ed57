//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter. The document store is connected here and handed to
//! the article service as a capability; nothing else holds it globally.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use stockroom_core::ArticleService;
use stockroom_db::SqliteDocumentStore;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Default store address.
pub const DEFAULT_STORE_URL: &str = "sqlite://stockroom.db";
/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8099";
/// Default collection holding articles.
pub const DEFAULT_COLLECTION: &str = "articles";
/// Default size of the store connection pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub listen_addr: SocketAddr,
    /// Document store address (a `SQLite` URL).
    pub store_url: String,
    /// Collection holding articles.
    pub collection: String,
    /// Upper bound on pooled store connections (concurrent requests
    /// touching the store).
    pub max_connections: u32,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config with default values.
    pub fn with_defaults() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8099)),
            store_url: DEFAULT_STORE_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            cors: CorsConfig::default(),
        }
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Article resource mapper shared by every handler.
    pub articles: Arc<ArticleService>,
    /// The store behind `articles`, kept for shutdown.
    pub store: SqliteDocumentStore,
}

/// Bootstrap the server: connect the store and prepare the article service.
///
/// Fails if the store is unreachable or the unique index on the article
/// code cannot be installed; the server must not start in either case.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let store = stockroom_db::connect(&config.store_url, config.max_connections).await?;
    bootstrap_with_store(store, &config.collection).await
}

/// Bootstrap over an already connected store.
pub async fn bootstrap_with_store(
    store: SqliteDocumentStore,
    collection: &str,
) -> Result<AxumContext> {
    let articles = Arc::new(ArticleService::new(Arc::new(store.clone()), collection));

    articles
        .ensure_indexes()
        .await
        .with_context(|| format!("Failed to ensure unique article code index on '{collection}'"))?;

    Ok(AxumContext { articles, store })
}

/// Start the web server and run until a shutdown signal arrives.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let ctx = bootstrap(&config).await?;
    let store = ctx.store.clone();
    let app = crate::routes::create_router(ctx, &config.cors);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    info!(
        "stockroom listening on http://{} (collection '{}')",
        listener.local_addr()?,
        config.collection
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("stockroom stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining requests");
}
