//! Custom extractors for Axum handlers.
//!
//! This module provides reusable extractors that reduce boilerplate
//! and standardize error handling across your API. Every rejection is
//! rendered through [`AppError`](crate::errors::AppError).

pub mod path;
pub mod query;
pub mod validated_json;

pub use path::Path;
pub use query::Query;
pub use validated_json::{ValidateJson, ValidatedJson};
