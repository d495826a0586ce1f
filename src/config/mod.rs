//! Configuration subsystem.
//!
//! The configuration snapshot is read once from the environment at startup,
//! validated, and passed explicitly into the pipeline builder. There are no
//! ambient lookups after that point.

pub mod loader;
pub mod schema;

pub use loader::ConfigError;
pub use schema::{AppConfig, DeployMode};
