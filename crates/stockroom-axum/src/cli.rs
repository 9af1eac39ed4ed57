//! Command-line configuration.
//!
//! Every flag falls back to an environment variable (a `.env` file is
//! loaded first by the binary), then to a built-in default.

use std::net::SocketAddr;

use clap::Parser;

use crate::bootstrap::{
    CorsConfig, DEFAULT_COLLECTION, DEFAULT_LISTEN_ADDR, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_STORE_URL, ServerConfig,
};

/// Serve the article catalogue over HTTP.
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(about = "Serve the article catalogue over HTTP/JSON")]
#[command(version)]
pub struct Cli {
    /// Document store address (`SQLite` URL)
    #[arg(long, env = "STOCKROOM_STORE_URL", default_value = DEFAULT_STORE_URL)]
    pub store_url: String,

    /// Address to listen on
    #[arg(long, env = "STOCKROOM_LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: SocketAddr,

    /// Collection holding articles
    #[arg(long, env = "STOCKROOM_COLLECTION", default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Maximum pooled store connections
    #[arg(long, env = "STOCKROOM_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Allowed CORS origin (repeatable); all origins when omitted
    #[arg(
        long = "allow-origin",
        env = "STOCKROOM_ALLOW_ORIGINS",
        value_delimiter = ','
    )]
    pub allow_origins: Vec<String>,
}

impl Cli {
    /// Convert parsed arguments into a server configuration.
    pub fn into_config(self) -> ServerConfig {
        let config = ServerConfig {
            listen_addr: self.listen,
            store_url: self.store_url,
            collection: self.collection,
            max_connections: self.max_connections,
            cors: CorsConfig::AllowAll,
        };

        if self.allow_origins.is_empty() {
            config
        } else {
            config.with_allowed_origins(self.allow_origins)
        }
    }
}
