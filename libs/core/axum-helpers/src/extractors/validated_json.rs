//! JSON extractor that runs a payload's own validation before the handler.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

/// Validation hook for request bodies.
///
/// Implementors receive the raw JSON document and either build the typed
/// payload or return a rejection. Working on the raw value lets a payload
/// check fields in a fixed order and report the first failing one, which
/// typed deserialization cannot do.
pub trait ValidateJson: Sized {
    type Rejection: IntoResponse;

    fn validate_json(value: Value) -> Result<Self, Self::Rejection>;
}

/// JSON extractor with validation.
///
/// A request without `Content-Type: application/json` is validated as an
/// empty object, so the payload's own first-field error is returned. Malformed
/// JSON is rejected through [`AppError::JsonExtractorRejection`]; a
/// well-formed document is handed to [`ValidateJson::validate_json`].
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::{ValidateJson, ValidatedJson};
///
/// struct CreateUser { username: String }
///
/// impl ValidateJson for CreateUser {
///     type Rejection = AppError;
///     fn validate_json(value: Value) -> Result<Self, AppError> {
///         value.get("username").and_then(Value::as_str)
///             .map(|u| CreateUser { username: u.to_string() })
///             .ok_or_else(|| AppError::BadRequest("missing username".into()))
///     }
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) -> String {
///     format!("Creating user: {}", payload.username)
/// }
///
/// let app = Router::new().route("/users", post(create_user));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: ValidateJson,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => value,
            Err(JsonRejection::MissingJsonContentType(_)) => Value::Object(Map::new()),
            Err(e) => return Err(AppError::from(e).into_response()),
        };

        T::validate_json(value)
            .map(ValidatedJson)
            .map_err(IntoResponse::into_response)
    }
}
