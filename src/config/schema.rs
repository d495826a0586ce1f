//! Configuration schema definitions.

use std::fmt;

/// Default listening port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Default allowed cross-origin source when `CORS_ORIGIN` is unset.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Immutable configuration snapshot for the process.
///
/// Built once at startup from environment variables and passed explicitly
/// into the pipeline builder. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listening port.
    pub port: u16,

    /// Allowed cross-origin source, sent back in CORS response headers.
    pub cors_origin: String,

    /// Deployment mode.
    pub mode: DeployMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            mode: DeployMode::Development,
        }
    }
}

/// Deployment mode, taken from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMode {
    Development,
    Production,
    /// Suppresses access logging so test output stays clean.
    Test,
}

impl DeployMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployMode::Development => "development",
            DeployMode::Production => "production",
            DeployMode::Test => "test",
        }
    }
}

impl fmt::Display for DeployMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
