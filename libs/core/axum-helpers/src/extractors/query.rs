//! Query string extractor with `{message}` rejections.

use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;

/// Drop-in replacement for [`axum::extract::Query`].
///
/// A query string that does not deserialize into `T` is rejected through
/// [`AppError::QueryExtractorRejection`] instead of axum's plain-text body.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::Query;
///
/// #[derive(Deserialize)]
/// struct Paging { page: Option<u32> }
///
/// async fn list(Query(paging): Query<Paging>) -> String {
///     format!("{:?}", paging.page)
/// }
/// ```
pub struct Query<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state).await?;
        Ok(Query(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Paging {
        page: Option<u32>,
    }

    async fn page(Query(paging): Query<Paging>) -> String {
        paging.page.unwrap_or(1).to_string()
    }

    async fn send(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = Router::new()
            .route("/", get(page))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_query_reaches_handler() {
        let (status, body) = send("/?page=4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"4");
    }

    #[tokio::test]
    async fn test_rejection_is_json_400() {
        for uri in ["/?page=abc", "/?page=1&page=2"] {
            let (status, body) = send(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");

            let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert!(body["message"].is_string(), "{uri}");
        }
    }
}
