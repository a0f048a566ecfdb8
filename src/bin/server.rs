//! learnhub HTTP server binary.
//!
//! Serves the chat resolver and the demo calculators over HTTP.
//!
//! # Environment Variables
//!
//! - `PORT` - HTTP port (default: 8080)
//! - `BIND_HOST` - listen address (default: 0.0.0.0)
//! - `CHAT_API_ENDPOINT` - remote generation endpoint
//! - `CHAT_API_KEY` / `GEMINI_API_KEY` - bearer credential (remote disabled when unset)
//! - `CHAT_API_TIMEOUT_SECS` - remote call timeout (default: 8)
//! - `CHAT_KEYWORDS_FILE` - YAML keyword table (default: built-in table)
//! - `RUST_LOG` - Tracing filter (default: "info,learnhub=debug")
//!
//! # Usage
//!
//! ```bash
//! CHAT_API_KEY=... cargo run --bin server
//! ```

use anyhow::Context;
use learnhub::chat::ChatResolver;
use learnhub::server::{app_router, AppState};
use learnhub::utilities::config::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,learnhub=debug".into()),
        )
        .init();

    let config = ServiceConfig::from_env().context("Invalid configuration")?;
    let table = config
        .keyword_table()
        .context("Failed to load keyword table")?;
    tracing::info!("Loaded {} keyword entries", table.len());

    let resolver = ChatResolver::from_config(table, &config.remote);
    if resolver.remote_enabled() {
        tracing::info!(endpoint = %config.remote.endpoint, "Remote chat generation enabled");
    } else {
        tracing::warn!("No chat API key configured; answering from keywords only");
    }

    let app = app_router(AppState::new(resolver));
    let bind_addr = config.bind_addr();

    tracing::info!("learnhub server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                - liveness probe");
    tracing::info!("  POST /chat                  - chat resolver");
    tracing::info!("  POST /demos/mean            - mean calculator");
    tracing::info!("  POST /demos/excel/:function - SUM/AVERAGE/MAX/MIN");
    tracing::info!("  GET  /demos/sample          - random sample data");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    tracing::info!("learnhub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
