//! Ghostwriter voice-note capture service.
//!
//! Main entry point for the webhook receiver. Initializes tracing, loads
//! configuration, connects the S3 note store, and serves until shutdown.

use std::sync::Arc;

use anyhow::Result;
use ghostwriter_core::SystemClock;
use ghostwriter_ingest::{storage::S3NoteStore, AppState, IngestConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting Ghostwriter voice-note capture service");

    // Load configuration from environment
    let config = IngestConfig::load()?;
    let addr = config.parse_server_addr()?;
    info!(
        bucket = %config.bucket_name,
        server_addr = %addr,
        "Configuration loaded"
    );

    // Connect the note store using ambient AWS configuration
    let store = S3NoteStore::from_env(config.bucket_name.clone()).await;
    info!("Note store ready");

    let state = AppState::new(config, Arc::new(store), Arc::new(SystemClock::new()));

    info!(addr = %addr, "Ghostwriter is ready to receive webhooks");
    ghostwriter_ingest::start_server(state, addr).await?;

    info!("Ghostwriter shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,ghostwriter=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
