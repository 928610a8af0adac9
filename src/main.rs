// src/main.rs
use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use inventory_admin::{
    config::AppConfig,
    routes,
    services::product_service::HttpProductService,
    state::AppState,
    view_model::manager::ProductManager,
    views::ScreenRenderer,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("inventory_admin=debug,tower_http=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return;
        }
    };

    let service = match HttpProductService::new(&config.product_api_url, config.request_timeout) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create product service client");
            return;
        }
    };
    tracing::info!(api = %service.base_url(), "Using product service");

    let renderer = match ScreenRenderer::new() {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "Failed to prepare templates");
            return;
        }
    };

    // Create application state
    let screen = ProductManager::new(Arc::new(service), config.focus_delay);
    let app = routes::create_router(AppState::new(screen, renderer));

    let Some((listener, addr)) = bind(&config).await else {
        tracing::error!(host = %config.host, port = config.port, "No free port to listen on");
        return;
    };
    tracing::info!("Inventory screen at http://{addr}/productsManager");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}

/// Highest offset tried above the configured port.
const PORT_ATTEMPTS: u16 = 20;

/// Binds the configured port, or the first free one above it.
async fn bind(config: &AppConfig) -> Option<(TcpListener, SocketAddr)> {
    for port in config.port..=config.port.saturating_add(PORT_ATTEMPTS) {
        let addr = SocketAddr::from((config.host, port));
        match TcpListener::bind(addr).await {
            Ok(listener) => return Some((listener, addr)),
            Err(e) => tracing::warn!(%addr, error = %e, "Cannot listen, trying next port"),
        }
    }
    None
}
