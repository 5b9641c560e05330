//! API routes module

pub mod products;

use axum::{routing::get, Router};

pub const GREETING: &str =
    "Hello, World! Welcome to the Product API! Go to /api/products to see all products.";

/// Greeting
#[utoipa::path(
    get,
    path = "/",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Greeting text", body = String, content_type = "text/plain"),
        (status = 401, response = axum_helpers::errors::responses::UnauthorizedResponse)
    )
)]
pub async fn root() -> &'static str {
    GREETING
}

/// Create all application routes. Everything here sits behind bearer auth.
pub fn routes() -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api/products", products::router())
}
