//! Process entry point.
//!
//! Startup is fail-fast: any configuration, composition, or bind error is
//! logged and the process exits non-zero for the supervisor to restart.

use api_server::config::AppConfig;
use api_server::http::{default_api_router, HttpServer};
use api_server::observability::logging;

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "Failed to start server");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    tracing::info!(
        port = config.port,
        mode = %config.mode,
        cors_origin = %config.cors_origin,
        "Configuration loaded"
    );

    let listener = HttpServer::bind(&config).await?;
    let server = HttpServer::new(config, default_api_router())?;
    server.run(listener).await?;

    Ok(())
}
