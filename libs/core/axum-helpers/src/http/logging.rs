use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

/// Request logging middleware.
///
/// Writes one `info` line per inbound request with the method and the
/// request target (path plus query), then hands the request on. It should sit
/// outside the auth layer so rejected requests are logged too.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| request.uri().path());

    info!("{} {}", request.method(), target);

    next.run(request).await
}
