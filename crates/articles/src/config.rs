//! Article service connection settings.

use thiserror::Error;

/// Base URL and credentials for the article service and its token endpoint.
///
/// Injected into the gateway constructor; nothing here is process-global.
#[derive(Debug, Clone)]
pub struct ArticlesConfig {
    /// Article collection base URL. Article URLs are formed by appending the
    /// id, so this should end with a trailing slash (e.g. `http://host/articulos/`).
    pub base_url: String,
    /// Token endpoint for the credential exchange.
    pub token_url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
}

impl ArticlesConfig {
    /// Read the configuration from `ARTICULOS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: require("ARTICULOS_URL")?,
            token_url: require("ARTICULOS_TOKEN_URL")?,
            username: require("ARTICULOS_USERNAME")?,
            password: require("ARTICULOS_PASSWORD")?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}
