//! # rd-server
//!
//! axum HTTP API over the dashboard service, document storage and survey
//! reporting data.
//!
//! All endpoints live under `/api` and require a staff bearer token when
//! `auth.staff` is configured; `/health` is always open.

pub mod auth;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

pub use error::ApiError;
pub use routes::api_router;
pub use state::AppState;

/// Bind and serve until the process receives Ctrl-C.
///
/// # Errors
///
/// Returns the I/O error if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "research dashboard API listening");
    axum::serve(listener, api_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
