//! stockroom server entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stockroom_axum::{Cli, start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before reading RUST_LOG or CLI env fallbacks
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    start_server(cli.into_config()).await
}
