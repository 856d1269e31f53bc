use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use ragchat_backend::config::AppConfig;
use ragchat_backend::logging;
use ragchat_backend::server::router;
use ragchat_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_dir = std::env::var("LOG_DIR").ok().map(PathBuf::from);
    logging::init(log_dir.as_deref());

    let config = AppConfig::from_env();
    let state = AppState::initialize(config).await?;
    tracing::info!("RAG enabled: {}", state.rag.is_enabled());

    let bind_addr = format!("0.0.0.0:{}", state.config.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let app: Router = router::router(state.clone());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // The store connection is released on every exit path, signal-driven
    // shutdown included.
    state.rag.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        return;
    }
    tracing::info!("Shutdown signal received");
}
