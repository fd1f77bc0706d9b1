//! HTTP server lifecycle

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api;
use crate::auth::require_auth;
use crate::core::ServerState;
use crate::utils::AppError;

/// HTTP server: owns the listener, serves until ctrl-c.
pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    /// Full application router. Exposed so integration tests can drive
    /// the API without binding a socket.
    pub fn build_router(state: ServerState) -> Router {
        api::router()
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    pub async fn run(self) -> Result<(), AppError> {
        let addr = format!("0.0.0.0:{}", self.state.config.http_port);
        let app = Self::build_router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
        info!(addr = %addr, "HTTP server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
