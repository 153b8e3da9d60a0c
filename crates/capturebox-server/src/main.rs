//! `capturebox` server entry point.
//!
//! Bootstraps the upload directory tree, then starts the Axum HTTP server
//! with graceful shutdown. A directory that cannot be created aborts
//! startup; a failed write check only logs a warning.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use capturebox_core::{StorageLayout, bootstrap};

use capturebox_server::app::build_router;
use capturebox_server::config::ServerConfig;
use capturebox_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(public_dir = %config.public_dir.display(), "capturebox starting");

    let layout = StorageLayout::under(&config.public_dir);
    let report = bootstrap(&layout)
        .await
        .context("failed to prepare upload directories")?;
    if !report.writable {
        warn!("upload directories are not writable, starting in degraded mode");
    }

    let state = AppState::new(&config, &layout, report);
    let app = build_router(state, &config.public_dir, config.body_limit);

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "capturebox listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("capturebox stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
