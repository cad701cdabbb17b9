//! # sbomseal-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the compliance proof service.
//! Binds to a configurable port (default 8080).

use sbomseal_api::state::AppState;
use sbomseal_client::SubsystemConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    // Subsystem endpoints and timeouts from the environment.
    let config = SubsystemConfig::from_env().map_err(|e| {
        tracing::error!("Subsystem configuration failed: {e}");
        e
    })?;
    tracing::info!(
        merkle = %config.merkle_url,
        proving = %config.proving_url,
        store = %config.artifact_store_url,
        ledger = %config.ledger_anchor_url,
        "subsystem endpoints configured"
    );

    let state = AppState::from_config(config).map_err(|e| {
        tracing::error!("HTTP client initialization failed: {e}");
        e
    })?;
    let app = sbomseal_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("sbomseal API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
