//! Main server initialization and run loop.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use metis_core::{Controller, ControllerConfig, EchoAgent};
use metis_llm::ProviderRouter;
use metis_store::MemoryStore;

/// Start the HTTP/WebSocket server and block until shutdown.
pub async fn run() -> Result<()> {
    let config = super::load_config()?;
    info!("Starting {} v{}", config.api.title, config.api.version);

    let controller = Arc::new(Controller::new(ControllerConfig {
        max_agents: config.agents.max_agents,
        agent_timeout_secs: config.agents.timeout_secs,
        ..ControllerConfig::default()
    }));

    // Default agents, as in a fresh deployment.
    for name in &config.agents.defaults {
        match controller
            .register(Arc::new(EchoAgent::new(name.as_str())))
            .await
        {
            Ok(total) => info!(agent = %name, total, "Registered default agent"),
            Err(e) => warn!(agent = %name, error = %e, "Skipping default agent"),
        }
    }

    let providers = Arc::new(ProviderRouter::from_settings(&config.llm));
    info!(chain = ?providers.provider_names(), "LLM provider chain ready");

    let store = Arc::new(MemoryStore::new());
    let config = Arc::new(config);

    let app = Router::new()
        .merge(crate::api::api_router())
        .merge(crate::websocket::websocket_router())
        .layer(Extension(controller))
        .layer(Extension(providers))
        .layer(Extension(store))
        .layer(Extension(config.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    info!("HTTP server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Metis shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
