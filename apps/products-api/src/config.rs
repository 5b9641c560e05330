//! Configuration for Products API

use axum_helpers::AuthConfig;
use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};

pub use core_config::Environment;

/// Shared secret accepted outside production when `API_TOKEN` is not set.
pub const DEVELOPMENT_API_TOKEN: &str = "WSM_secret_key*#789)-+";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let auth = AuthConfig::from_env_or(DEVELOPMENT_API_TOKEN)?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(["APP_ENV", "PORT", "HOST", "API_TOKEN"], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.app.name, "products_api");
            assert_eq!(config.server.port, 3000);
            assert!(config.environment.is_development());
            assert_eq!(config.auth.api_token, DEVELOPMENT_API_TOKEN);
        });
    }

    #[test]
    fn test_port_override() {
        temp_env::with_vars([("PORT", Some("8081")), ("APP_ENV", None)], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.server.port, 8081);
        });
    }

    #[test]
    fn test_invalid_port_is_error() {
        temp_env::with_var("PORT", Some("not-a-port"), || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_production_requires_token() {
        temp_env::with_vars(
            [("APP_ENV", Some("production")), ("API_TOKEN", None)],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
