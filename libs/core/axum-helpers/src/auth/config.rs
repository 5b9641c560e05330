//! Configuration types for axum-helpers.
//!
//! Implements the `FromEnv` trait from `core_config`, following the same
//! pattern as `ServerConfig`.

use core_config::{ConfigError, Environment, FromEnv, env_required};

/// Bearer-token authentication configuration.
///
/// Loaded from environment variables:
/// - `API_TOKEN`: the shared secret. [`FromEnv`] always requires it;
///   [`AuthConfig::from_env_or`] lets an application supply its own
///   fallback outside production.
///
/// # Example
///
/// ```ignore
/// use axum_helpers::AuthConfig;
/// use core_config::FromEnv;
///
/// let config = AuthConfig::from_env()?;
/// let config = AuthConfig::from_env_or("local-dev-token")?;
/// let config = AuthConfig::new("test-token");
/// ```
#[derive(Clone)]
pub struct AuthConfig {
    pub api_token: String,
}

impl AuthConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
        }
    }

    /// Like [`FromEnv::from_env`], but outside production a missing
    /// `API_TOKEN` falls back to `development_token`.
    pub fn from_env_or(development_token: &str) -> Result<Self, ConfigError> {
        if Environment::from_env().is_production() {
            return Self::from_env();
        }

        let api_token = std::env::var("API_TOKEN").unwrap_or_else(|_| {
            tracing::warn!("API_TOKEN not set, using the development token");
            development_token.to_string()
        });
        Self::checked(api_token)
    }

    fn checked(api_token: String) -> Result<Self, ConfigError> {
        if api_token.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "API_TOKEN".to_string(),
                details: "must not be empty".to_string(),
            });
        }
        Ok(Self { api_token })
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_token", &"<redacted>")
            .finish()
    }
}

impl FromEnv for AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::checked(env_required("API_TOKEN")?)
    }
}
