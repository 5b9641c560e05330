use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use super::config::AuthConfig;
use crate::errors::{AppError, ErrorCode};

/// Shared-secret bearer authenticator.
///
/// Holds the one token the API accepts. Cheap to clone; pass it as state to
/// [`bearer_auth_middleware`].
#[derive(Clone)]
pub struct BearerAuth {
    token: Arc<str>,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }

    /// Exact match against the configured secret.
    pub fn verify(&self, candidate: &str) -> bool {
        candidate == &*self.token
    }
}

impl From<&AuthConfig> for BearerAuth {
    fn from(config: &AuthConfig) -> Self {
        Self::new(config.api_token.clone())
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// Whitespace around the token is ignored; the scheme is case-sensitive.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Bearer authentication middleware
///
/// Rejects the request with 401 `{"message": "Unauthorized"}` unless it
/// carries the configured token. Nothing behind this layer runs for a
/// rejected request.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::{BearerAuth, bearer_auth_middleware};
///
/// let protected_routes = Router::new()
///     .route("/api/protected", get(protected_handler))
///     .layer(axum::middleware::from_fn_with_state(
///         BearerAuth::new("secret"),
///         bearer_auth_middleware,
///     ));
/// ```
pub async fn bearer_auth_middleware(
    State(auth): State<BearerAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let verified = extract_bearer_token(request.headers()).map(|token| auth.verify(token));

    match verified {
        Some(true) => Ok(next.run(request).await),
        Some(false) => {
            tracing::debug!("Bearer token mismatch");
            Err(unauthorized())
        }
        None => {
            tracing::debug!("No bearer token in Authorization header");
            Err(unauthorized())
        }
    }
}

fn unauthorized() -> AppError {
    AppError::Unauthorized(ErrorCode::Unauthorized.default_message().to_string())
}
