//! Path parameter extractor with `{message}` rejections.

use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;

/// Drop-in replacement for [`axum::extract::Path`].
///
/// A path that cannot be decoded (bad percent-encoding, wrong type) is
/// rejected through [`AppError::PathExtractorRejection`] instead of axum's
/// plain-text body.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::Path;
///
/// async fn get_user(Path(id): Path<String>) -> String {
///     format!("User ID: {}", id)
/// }
///
/// let app = Router::new().route("/users/{id}", get(get_user));
/// ```
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) =
            axum::extract::Path::<T>::from_request_parts(parts, state).await?;
        Ok(Path(value))
    }
}
