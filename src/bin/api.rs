//! TicketMaster API Server
//!
//! Run with: cargo run --bin ticketmaster-api
//!
//! # Configuration
//!
//! Settings come from the first config file found (see `Config::load_default`),
//! or from the path in `TICKETMASTER_CONFIG`. Environment variables override:
//! - `TICKETMASTER_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TICKETMASTER_API_PORT`: Port to listen on (default: 8000)
//! - `TICKETMASTER_TICKET_EXPIRATION`: Ticket lifetime in seconds (default: 1209600)
//! - `TICKETMASTER_LOG_LEVEL` / `TICKETMASTER_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter override

use std::path::PathBuf;
use std::sync::Arc;

use ticketmaster::api::{serve, AppState};
use ticketmaster::config::Config;
use ticketmaster::logging::init_tracing;
use ticketmaster::tickets::TicketStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_path) = match std::env::var_os("TICKETMASTER_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            (Config::load_with_env(&path)?, Some(path))
        }
        None => Config::load_default()?,
    };

    init_tracing(&config.logging, "tower_http=debug");

    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults with environment overrides"),
    }

    tracing::info!("Starting TicketMaster API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Tickets expire {}s after creation",
        config.store.ticket_expiration_secs
    );

    let store = Arc::new(TicketStore::new(config.store.clone()));
    let sweep_handle = store.start_background_sweep();

    let state = AppState::new(Arc::clone(&store), config.api.clone());

    tracing::info!("Starting server on {}:{}", config.api.host, config.api.port);
    serve(state, &config.api).await?;

    sweep_handle.abort();
    tracing::info!("TicketMaster API server stopped");

    Ok(())
}
