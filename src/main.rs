//! vod-relay server entry point

use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vod_relay::{
    config,
    network::HttpClient,
    providers::ProviderRegistry,
    web::{create_router, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("Starting vod-relay v{}", vod_relay::VERSION);

    // Load configuration
    let settings = config::load()?;

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized (timeout {:?})", client.timeout());

    // Build route table
    let registry = ProviderRegistry::from_settings(&settings);
    for provider in registry.all() {
        info!("Route {}: {} ({})", provider.id, provider.name, provider.base_url);
    }

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    // Create application state and router
    let state = AppState::new(settings, registry, client);
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Relay listening on http://localhost:{}", addr.port());
    axum::serve(listener, app).await?;

    Ok(())
}
