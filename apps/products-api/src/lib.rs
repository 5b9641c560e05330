//! Products API - REST server for the product catalogue

pub mod api;
pub mod config;
pub mod openapi;

use axum::Router;
use axum_helpers::{create_router, BearerAuth};

use config::Config;

/// Build the full application router: docs, health, and the authenticated
/// product API.
pub fn app(config: &Config) -> Router {
    create_router::<openapi::ApiDoc>(api::routes(), BearerAuth::from(&config.auth), config.app)
}
