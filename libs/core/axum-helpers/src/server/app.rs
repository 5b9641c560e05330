use super::health::health_router;
use super::shutdown::shutdown_signal;
use crate::auth::{BearerAuth, bearer_auth_middleware};
use crate::errors::handlers::{handle_panic, method_not_allowed, not_found};
use crate::http::{request_logger, security_headers};
use axum::{Router, middleware};
use core_config::AppInfo;
use core_config::server::ServerConfig;
use std::io;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Path of the interactive API documentation.
pub const DOCS_PATH: &str = "/api-docs";
/// Path of the raw OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/openapi.json";

/// Starts the Axum server with graceful shutdown.
///
/// # Errors
/// Returns an error if the TCP listener fails to bind to the configured
/// address, or if the server fails while running.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use core_config::server::ServerConfig;
/// use axum_helpers::server::create_app;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let router = Router::new();
///     let config = ServerConfig::default();
///     create_app(router, &config).await?;
///     Ok(())
/// }
/// ```
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server is running on http://{}", listener.local_addr()?);
    info!("API docs available at http://{}{}", listener.local_addr()?, DOCS_PATH);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    info!("Server stopped");
    Ok(())
}

/// Creates the application router with documentation, auth and the common
/// middleware stack.
///
/// Layout:
/// - `/api-docs` (Swagger UI) and `/openapi.json` are public
/// - `/health` is public
/// - everything in `apis` sits behind the bearer-token check, as do the
///   JSON 404 and 405 fallbacks
///
/// Middleware, outermost first: request logger, HTTP trace span, security
/// headers, panic catcher. The request logger runs before auth so rejected
/// requests are still logged.
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` for API documentation
///
/// # Example
/// ```ignore
/// let routes = Router::new()
///     .route("/", get(root))
///     .nest("/api/products", products_router);
///
/// let router = create_router::<ApiDoc>(routes, BearerAuth::new("secret"), app_info!());
/// ```
pub fn create_router<T>(apis: Router, auth: BearerAuth, app_info: AppInfo) -> Router
where
    T: OpenApi + 'static,
{
    let protected = apis
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn_with_state(auth, bearer_auth_middleware));

    Router::new()
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(health_router(app_info))
        .merge(protected)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(request_logger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        routing::get,
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const TOKEN: &str = "test-token";

    #[derive(OpenApi)]
    #[openapi(info(title = "Test API", version = "0.0.1"))]
    struct TestDoc;

    fn app() -> Router {
        let routes = Router::new()
            .route("/", get(|| async { "root" }))
            .route("/api/items", get(|| async { "items" }))
            .route(
                "/api/boom",
                get(|| async {
                    if true {
                        panic!("handler blew up");
                    }
                    "unreachable"
                }),
            );
        create_router::<TestDoc>(
            routes,
            BearerAuth::new(TOKEN),
            AppInfo {
                name: "test-app",
                version: "0.0.1",
            },
        )
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let response = app().oneshot(get_request("/api/items", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await, json!({"message": "Unauthorized"}));
    }

    #[tokio::test]
    async fn test_protected_route_with_token() {
        let response = app()
            .oneshot(get_request("/api/items", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_openapi_json_is_public() {
        let response = app().oneshot(get_request("/openapi.json", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["info"]["title"], "Test API");
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = app().oneshot(get_request("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["name"], "test-app");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404_behind_auth() {
        let unauthenticated = app().oneshot(get_request("/nope", None)).await.unwrap();
        assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

        let response = app().oneshot(get_request("/nope", Some(TOKEN))).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            json!({"message": "Resource not found"})
        );
    }

    #[tokio::test]
    async fn test_wrong_method_is_json_405() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/items")
            .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            json_body(response).await,
            json!({"message": "Method not allowed"})
        );
    }

    #[tokio::test]
    async fn test_panic_becomes_500() {
        let app = app();

        let response = app
            .clone()
            .oneshot(get_request("/api/boom", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert_eq!(
            json_body(response).await,
            json!({"message": "Internal Server Error"})
        );

        // the router keeps serving
        let response = app
            .oneshot(get_request("/api/items", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
