//! API server scaffold.
//!
//! Assembles a fixed middleware pipeline in front of an externally supplied
//! `/api` router and binds it to a port read from the environment:
//!
//! ```text
//! security headers → CORS → rate limit (/api) → body limit → compression
//!     → access log → GET /health | /api router → error handler (last)
//! ```
//!
//! Domain routes, persistence, and authentication live in collaborating
//! crates or modules; this crate owns the pipeline, the configuration
//! snapshot, the health endpoint, and fail-fast startup.

pub mod config;
pub mod http;
pub mod observability;
pub mod security;

pub use config::{AppConfig, DeployMode};
pub use http::HttpServer;
