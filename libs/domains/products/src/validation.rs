//! Request body validation for create and update.
//!
//! Fields are checked in a fixed order (name, price, description, category,
//! inStock) and the first failure is reported. A body that is JSON but not an
//! object is treated as an empty object.

use axum_helpers::ValidateJson;
use serde_json::{Map, Number, Value};

use crate::error::{ProductError, ProductResult};
use crate::models::ProductInput;

fn missing(field: &str) -> ProductError {
    ProductError::Validation(format!("Invalid or missing \"{field}\""))
}

fn non_empty_str(fields: &Map<String, Value>, field: &str) -> ProductResult<String> {
    match fields.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(missing(field)),
    }
}

fn number(fields: &Map<String, Value>, field: &str) -> ProductResult<Number> {
    match fields.get(field) {
        Some(Value::Number(n)) => Ok(n.clone()),
        _ => Err(missing(field)),
    }
}

pub fn validate_product(body: &Value) -> ProductResult<ProductInput> {
    let empty = Map::new();
    let fields = body.as_object().unwrap_or(&empty);

    let name = non_empty_str(fields, "name")?;
    let price = number(fields, "price")?;
    let description = non_empty_str(fields, "description")?;
    let category = non_empty_str(fields, "category")?;
    let in_stock = fields
        .get("inStock")
        .and_then(Value::as_bool)
        .ok_or_else(|| {
            ProductError::Validation("Invalid or missing \"inStock\" (should be boolean)".to_string())
        })?;

    Ok(ProductInput {
        name,
        description,
        price,
        category,
        in_stock,
    })
}

impl ValidateJson for ProductInput {
    type Rejection = ProductError;

    fn validate_json(value: Value) -> Result<Self, Self::Rejection> {
        validate_product(&value)
    }
}
