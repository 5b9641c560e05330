//! Products API routes

use axum::Router;
use domain_products::{handlers, InMemoryProductRepository, ProductService};

/// Create products router over a freshly seeded store
pub fn router() -> Router {
    let repository = InMemoryProductRepository::with_seed();
    let service = ProductService::new(repository);
    handlers::router(service)
}
