//! event-builder server entry point.
//!
//! Starts the Axum HTTP server with the event REST endpoints.

use tracing_subscriber::EnvFilter;

use event_builder::app;
use event_builder::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        addr = %config.listen_addr,
        prefix = %config.api_prefix,
        "starting event-builder"
    );

    let state = app::bootstrap(&config).await?;
    let router = app::router(state, &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, router).await?;

    Ok(())
}
