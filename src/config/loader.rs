//! Configuration loading from the process environment.

use thiserror::Error;

use crate::config::schema::{AppConfig, DeployMode, DEFAULT_CORS_ORIGIN, DEFAULT_PORT};

/// Environment variable holding the listening port.
pub const PORT_VAR: &str = "PORT";

/// Environment variable holding the allowed cross-origin source.
pub const CORS_ORIGIN_VAR: &str = "CORS_ORIGIN";

/// Environment variable holding the deployment mode.
pub const APP_ENV_VAR: &str = "APP_ENV";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {0:?}: must be a number between 1 and 65535")]
    InvalidPort(String),

    #[error("unknown APP_ENV value {0:?}: expected development, production, or test")]
    UnknownMode(String),
}

impl AppConfig {
    /// Read the configuration snapshot from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Split out from [`AppConfig::from_env`] so parsing can be exercised
    /// without mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_VAR) {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let cors_origin =
            lookup(CORS_ORIGIN_VAR).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let mode = match lookup(APP_ENV_VAR) {
            Some(raw) => match raw.trim() {
                "development" => DeployMode::Development,
                "production" => DeployMode::Production,
                "test" => DeployMode::Test,
                _ => return Err(ConfigError::UnknownMode(raw)),
            },
            None => DeployMode::Development,
        };

        Ok(AppConfig {
            port,
            cors_origin,
            mode,
        })
    }
}
