//! Axum web server adapter for stockroom.
//!
//! Exposes the article catalogue over HTTP/JSON. [`bootstrap`] is the
//! composition root: it connects the document store, installs the unique
//! index on the article code and builds the [`ArticleService`] the
//! handlers share.
//!
//! [`ArticleService`]: stockroom_core::ArticleService

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for integration-only test deps
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tower as _;

// Dependencies used by main.rs binary
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{
    AxumContext, CorsConfig, ServerConfig, bootstrap, bootstrap_with_store, start_server,
};
pub use cli::Cli;
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
