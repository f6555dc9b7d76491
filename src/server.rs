/// Server setup and initialization
///
/// Wires the relay service into the HTTP routes and runs the Axum server.

use crate::{
    api::{create_health_routes, create_relay_routes, RelayAppState},
    config::Config,
    relay::RelayService,
};
use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();
}

/// Build the router around an already constructed relay service
///
/// Tests use this to inject fakes or point the service at mock servers.
pub fn build_router(state: RelayAppState) -> Router {
    Router::new()
        .merge(create_health_routes())
        .merge(create_relay_routes().with_state(state))
        .layer(TraceLayer::new_for_http())
}

/// Create the main Axum application from configuration
pub fn create_app(config: &Config) -> Result<Router> {
    tracing::info!(
        "🔗 Relaying to {} (timeout {}s)",
        config.relay.upstream_base_url,
        config.relay.timeout_secs
    );
    if config.relay.error_notif_url.is_none() {
        tracing::warn!("🔕 ERROR_NOTIF_URL is not set, failed relays will not be reported");
    }

    let relay = RelayService::from_config(&config.relay)
        .map_err(|e| anyhow::anyhow!("Failed to initialize relay service: {}", e))?;

    Ok(build_router(RelayAppState { relay }))
}

/// Start the HTTP server with the given configuration
pub async fn start_server(config: Config) -> Result<()> {
    tracing::info!("Starting relay server...");

    let app = create_app(&config)?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
