//! Middleware pipeline assembly.
//!
//! The stage sequence is data, not implicit control flow: [`stages`] returns
//! the fixed order for a deployment mode and [`build`] iterates it to compose
//! the router. Tests inspect the same list the builder consumes.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{self, InvalidHeaderValue};
use axum::http::{HeaderValue, Method};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use thiserror::Error;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::config::{AppConfig, DeployMode};
use crate::http::error;
use crate::http::health::{self, AppState};
use crate::observability::access_log::access_log;
use crate::security::headers::security_headers;
use crate::security::rate_limit::{rate_limit_middleware, RateLimiterState};

/// Path prefix under which the domain router is mounted.
pub const API_PREFIX: &str = "/api";

/// Path of the health responder.
pub const HEALTH_PATH: &str = "/health";

/// Counting window for the rate limiter.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Requests allowed per client IP per window.
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 100;

/// Maximum accepted request body size in bytes.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// One unit in the request-processing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SecurityHeaders,
    Cors,
    RateLimit,
    BodyLimit,
    Compression,
    AccessLog,
    HealthRoute,
    ApiRoutes,
    ErrorHandler,
}

/// The fixed stage sequence for a deployment mode, in request-flow order.
///
/// Test mode omits the access log; the relative order of everything else is
/// identical across modes. The error handler is always last: no stage runs
/// after it.
pub fn stages(mode: DeployMode) -> Vec<Stage> {
    let mut order = vec![
        Stage::SecurityHeaders,
        Stage::Cors,
        Stage::RateLimit,
        Stage::BodyLimit,
        Stage::Compression,
        Stage::AccessLog,
        Stage::HealthRoute,
        Stage::ApiRoutes,
        Stage::ErrorHandler,
    ];
    if mode == DeployMode::Test {
        order.retain(|stage| *stage != Stage::AccessLog);
    }
    order
}

/// Error raised while composing the pipeline.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid CORS origin {origin:?}: {source}")]
    InvalidCorsOrigin {
        origin: String,
        source: InvalidHeaderValue,
    },
}

/// Compose the full request pipeline for `config`, mounting `api` under
/// [`API_PREFIX`].
///
/// Routes are registered first, then middleware is applied in reverse list
/// order so a request flows through the layers in list order. The error
/// handler, last in the list, becomes the innermost layer wrapping the
/// router, which is the only position from which it can observe router
/// failures. Inline rejections (quota, body size) happen in outer layers and
/// never reach it.
pub fn build(config: &AppConfig, api: Router, state: AppState) -> Result<Router, BuildError> {
    let order = stages(config.mode);
    let cors = cors_layer(&config.cors_origin)?;
    let rate_limiter = Arc::new(RateLimiterState::new(
        RATE_LIMIT_WINDOW,
        RATE_LIMIT_MAX_REQUESTS,
    ));

    let mut health_router = Some(
        Router::new()
            .route(HEALTH_PATH, get(health::health))
            .with_state(state),
    );
    let mut api = Some(api);

    let mut app = Router::new();
    for stage in &order {
        app = match stage {
            Stage::HealthRoute => match health_router.take() {
                Some(routes) => app.merge(routes),
                None => app,
            },
            Stage::ApiRoutes => match api.take() {
                Some(routes) => app.nest(API_PREFIX, routes),
                None => app,
            },
            _ => app,
        };
    }

    for stage in order.iter().rev() {
        app = match stage {
            Stage::SecurityHeaders => app.layer(middleware::from_fn(security_headers)),
            Stage::Cors => app.layer(cors.clone()),
            Stage::RateLimit => app.layer(middleware::from_fn_with_state(
                rate_limiter.clone(),
                rate_limit_middleware,
            )),
            Stage::BodyLimit => app.layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
            Stage::Compression => app.layer(CompressionLayer::new()),
            Stage::AccessLog => app.layer(middleware::from_fn(access_log)),
            Stage::ErrorHandler => app.layer(CatchPanicLayer::custom(error::handle_panic)),
            Stage::HealthRoute | Stage::ApiRoutes => app,
        };
    }

    Ok(app)
}

/// CORS layer for the configured origin, with credentials enabled.
///
/// Wildcards are rejected by tower-http when credentials are allowed, so the
/// method and header lists are explicit.
fn cors_layer(origin: &str) -> Result<CorsLayer, BuildError> {
    let origin_value: HeaderValue =
        origin
            .parse()
            .map_err(|source| BuildError::InvalidCorsOrigin {
                origin: origin.to_string(),
                source,
            })?;

    Ok(CorsLayer::new()
        .allow_origin(origin_value)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
