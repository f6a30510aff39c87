//! Liveness endpoint for external uptime monitors.

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const ALIVE_MESSAGE: &str = "Hello. I am alive!";

pub fn router() -> Router {
    Router::new().route("/", get(|| async { ALIVE_MESSAGE }))
}

/// Binds the liveness listener. Done before the bot starts polling so a
/// taken port fails startup instead of failing silently in the background.
pub async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind liveness endpoint on {addr}"))
}

/// Serves the liveness route on its own task.
pub fn spawn(listener: TcpListener) -> JoinHandle<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "liveness endpoint listening");
    }

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router()).await {
            tracing::warn!(error = %e, "liveness endpoint stopped");
        }
    })
}
