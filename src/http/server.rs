//! HTTP server setup.
//!
//! # Responsibilities
//! - Compose the middleware pipeline in its fixed order
//! - Bind the listener on the configured port
//! - Log startup confirmation and the health-check URL
//! - Serve until shutdown

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::http::error::ErrorBody;
use crate::http::health::AppState;
use crate::http::pipeline::{self, BuildError, HEALTH_PATH};

/// Error raised while composing or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// HTTP server wrapping the composed pipeline.
///
/// Two states: composed (no socket open) and listening. [`HttpServer::run`]
/// is the only transition; there is no way back.
pub struct HttpServer {
    app: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Compose the pipeline for `config`, mounting `api` under the API
    /// prefix.
    pub fn new(config: AppConfig, api: Router) -> Result<Self, ServerError> {
        let app = pipeline::build(&config, api, AppState::new())?;
        Ok(Self { app, config })
    }

    /// Bind a listener on the configured port.
    pub async fn bind(config: &AppConfig) -> std::io::Result<TcpListener> {
        TcpListener::bind(("0.0.0.0", config.port)).await
    }

    /// Accept connections on `listener` until shutdown.
    pub async fn run(self, listener: TcpListener) -> Result<(), ServerError> {
        let port = listener.local_addr()?.port();

        tracing::info!(port, mode = %self.config.mode, "Server running");
        tracing::info!("Health check: http://localhost:{port}{HEALTH_PATH}");

        let app = self
            .app
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }

    /// The composed router, for driving the pipeline directly in tests.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Stand-in for the domain router until route modules are mounted.
///
/// Answers every path under the API prefix with a JSON 404.
pub fn default_api_router() -> Router {
    Router::new().fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not Found".to_string(),
        }),
    )
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
