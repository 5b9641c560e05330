//! Authentication module.
//!
//! This module provides:
//! - `AuthConfig`, the shared secret loaded from the environment
//! - `BearerAuth` and `bearer_auth_middleware` for protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{AuthConfig, BearerAuth, bearer_auth_middleware};
//! use core_config::FromEnv;
//!
//! let config = AuthConfig::from_env()?;
//! let protected = Router::new()
//!     .route("/api/protected", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(
//!         BearerAuth::from(&config),
//!         bearer_auth_middleware,
//!     ));
//! ```

pub mod config;
pub mod middleware;

pub use config::AuthConfig;
pub use middleware::{BearerAuth, bearer_auth_middleware};
