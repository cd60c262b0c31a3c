//! Listener and graceful shutdown

use anyhow::{Context, Result};
use axum::Router;
use filemeta_core::Config;
use std::net::{Ipv4Addr, SocketAddr};

/// Bind the webhook listener and serve until SIGINT or SIGTERM.
///
/// In-flight webhook calls are allowed to finish before returning.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server_port()));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind webhook listener on {}", addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        storage_backend = %config.storage_backend(),
        max_body_bytes = config.max_body_bytes(),
        http_concurrency_limit = config.http_concurrency_limit(),
        "Accepting storage webhook calls"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .context("Webhook server terminated with an error")?;

    tracing::info!("Webhook server stopped");
    Ok(())
}

/// Resolves with the name of the first shutdown signal received.
///
/// # Panics
/// Panics if a signal handler cannot be installed.
async fn shutdown_signal() -> &'static str {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}

async fn wait_for_shutdown() {
    let signal = shutdown_signal().await;
    tracing::info!(signal, "Draining in-flight webhook calls before exit");
}
