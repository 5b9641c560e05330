use std::any::Any;

use axum::{http::StatusCode, response::Response};

use super::{AppError, ErrorCode, error_response};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> AppError {
    AppError::NotFound(ErrorCode::NotFound.default_message().to_string())
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed(ErrorCode::MethodNotAllowed.default_message().to_string())
}

/// Converts a caught handler panic into a 500 response.
///
/// Plug into `tower_http::catch_panic::CatchPanicLayer::custom` so a panic in
/// any handler future ends up in the same `{message}` shape as every other
/// failure instead of dropping the connection.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(
        error_code = ErrorCode::HandlerPanic.code(),
        panic = %detail,
        "Handler panicked"
    );

    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::HandlerPanic.default_message(),
    )
}
