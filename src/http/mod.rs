//! HTTP subsystem: pipeline assembly, server, health endpoint, error
//! responses.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → security headers → CORS → rate limit (/api only) → body limit
//!     → compression → access log (skipped in test mode)
//!     → GET /health  |  /api router
//!     → error handler (wraps the router, always last)
//! ```

pub mod error;
pub mod health;
pub mod pipeline;
pub mod server;

pub use error::ApiError;
pub use pipeline::{Stage, API_PREFIX, HEALTH_PATH, MAX_BODY_BYTES};
pub use server::{default_api_router, HttpServer};
