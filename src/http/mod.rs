pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;

use crate::config::GatewayConfig;
use crate::http::handlers::SharedGateway;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(gateway: SharedGateway) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        .route("/upsert", post(handlers::upsert))
        .route("/query", post(handlers::query))
        .route("/delete", post(handlers::delete))
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}

/// Binds the configured address and serves until Ctrl-C or SIGTERM.
pub async fn serve(config: &GatewayConfig, gateway: SharedGateway) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.address()).await?;
    info!(address = %listener.local_addr()?, "chroma gateway listening");
    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("chroma gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl-C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
