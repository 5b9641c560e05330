//! Type-safe error codes for structured logs.
//!
//! Each error code has a string identifier (e.g., "VALIDATION_ERROR"), an
//! integer code for log queries (e.g., 1001) and a default message.
//! Codes are attached to log events only; response bodies carry `message`.
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Path parameter could not be decoded
    PathExtraction,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Query string could not be decoded
    QueryExtraction,

    /// Requested resource was not found
    NotFound,

    /// Bearer credential is missing or wrong
    Unauthorized,

    /// HTTP method not supported by the route
    MethodNotAllowed,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    /// A handler panicked and the panic was caught
    HandlerPanic,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::PathExtraction => "PATH_EXTRACTION",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::QueryExtraction => "QUERY_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::HandlerPanic => "HANDLER_PANIC",
        }
    }

    /// Integer code for logging and monitoring.
    ///
    /// - 1000-1999: client errors
    /// - 5000-5999: server errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::PathExtraction => 1002,
            Self::JsonExtraction => 1003,
            Self::QueryExtraction => 1011,
            Self::NotFound => 1004,
            Self::Unauthorized => 1006,
            Self::MethodNotAllowed => 1012,
            Self::InternalError => 5000,
            Self::HandlerPanic => 5001,
        }
    }

    /// Default user-facing message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::PathExtraction => "Invalid path parameter",
            Self::JsonExtraction => "Failed to parse request body",
            Self::QueryExtraction => "Invalid query string",
            Self::NotFound => "Resource not found",
            Self::Unauthorized => "Unauthorized",
            Self::MethodNotAllowed => "Method not allowed",
            Self::InternalError => "Internal Server Error",
            Self::HandlerPanic => "Internal Server Error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::HandlerPanic.to_string(), "HANDLER_PANIC");
    }

    #[test]
    fn test_error_code_integer_codes() {
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(ErrorCode::Unauthorized.code(), 1006);
        assert_eq!(ErrorCode::InternalError.code(), 5000);
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ValidationError).unwrap();
        assert_eq!(json, "\"VALIDATION_ERROR\"");

        let code: ErrorCode = serde_json::from_str("\"NOT_FOUND\"").unwrap();
        assert_eq!(code, ErrorCode::NotFound);
    }
}
