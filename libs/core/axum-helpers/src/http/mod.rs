//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - Request logging
//! - Security headers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{request_logger, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(axum::middleware::from_fn(request_logger));
//! ```

pub mod logging;
pub mod security;

pub use logging::request_logger;
pub use security::security_headers;
