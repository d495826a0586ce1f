//! Cross-cutting observability.
//!
//! Logging init runs once in `main`; the access-log middleware is wired into
//! the pipeline by the builder.

pub mod access_log;
pub mod logging;
