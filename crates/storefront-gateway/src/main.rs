//! Storefront Gateway - transaction orchestration for the storefront.
//!
//! This is the main entry point for the gateway service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_gateway::{create_router, AppState, GatewayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting storefront gateway");

    // Load configuration from environment; missing backend addresses are
    // startup-fatal.
    let config = GatewayConfig::from_env()?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        auth_api = %config.auth_base_url,
        io_api = %config.io_base_url,
        "Gateway configuration loaded"
    );

    // Build app state (one client per backend)
    let state = AppState::new(config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
