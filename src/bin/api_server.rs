// API Server Binary Entry Point
//
// Purpose: Serve the seasonal task guide over HTTP
// Usage: cargo run --features api --bin api_server

use seasonal_guide::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "seasonal_guide=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = ServerConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  TASKS_FILE: {}", config.tasks_file.display());
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  TASK_CACHE_TTL_SECS: {}", config.task_cache_ttl_secs);
    tracing::info!("  RESPONSE_CACHE_TTL_SECS: {}", config.response_cache_ttl_secs);

    let state = AppState::new(&config).await?;
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
