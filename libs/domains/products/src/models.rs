use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::HashMap;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the server
    #[schema(example = "1")]
    pub id: String,
    /// Product name
    #[schema(example = "Laptop")]
    pub name: String,
    /// Product description
    #[schema(example = "High-performance laptop with 16GB RAM")]
    pub description: String,
    /// Price, kept in the numeric form it was sent in
    #[schema(value_type = f64, example = 1200)]
    pub price: Number,
    /// Free-form category
    #[schema(example = "electronics")]
    pub category: String,
    /// Availability flag
    pub in_stock: bool,
}

impl Product {
    /// Build a new product with a freshly generated id.
    pub fn new(input: ProductInput) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), input)
    }

    pub fn with_id(id: impl Into<String>, input: ProductInput) -> Self {
        Self {
            id: id.into(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            in_stock: input.in_stock,
        }
    }

    /// Overwrite the mutable fields with `input`. The id never changes.
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.category = input.category;
        self.in_stock = input.in_stock;
    }
}

/// Request body for create and update.
///
/// Any `id` or unknown field in the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[schema(example = "Laptop")]
    pub name: String,
    #[schema(example = "High-performance laptop with 16GB RAM")]
    pub description: String,
    #[schema(value_type = f64, example = 1200)]
    pub price: Number,
    #[schema(example = "electronics")]
    pub category: String,
    pub in_stock: bool,
}

/// One page of the product listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    pub page: usize,
    pub limit: usize,
    /// Size of the whole collection, not of this page
    pub total: usize,
    pub data: Vec<Product>,
}

/// Pagination parameters.
///
/// Kept as raw strings so a value that is not a positive integer falls back
/// to the default instead of rejecting the request. A repeated key keeps its
/// first value.
#[derive(Debug, Default, Clone, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number, starting at 1
    #[param(value_type = Option<u32>, minimum = 1, example = 1)]
    pub page: Option<String>,
    /// Page size, defaults to the whole collection
    #[param(value_type = Option<u32>, minimum = 1, example = 10)]
    pub limit: Option<String>,
}

/// Search parameters. A repeated `q` keeps its first value.
#[derive(Debug, Default, Clone, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the product name (required)
    #[param(example = "laptop")]
    pub q: Option<String>,
}

impl<'de> Deserialize<'de> for ListQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut values = first_values(deserializer)?;
        Ok(Self {
            page: values.remove("page"),
            limit: values.remove("limit"),
        })
    }
}

impl<'de> Deserialize<'de> for SearchQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut values = first_values(deserializer)?;
        Ok(Self {
            q: values.remove("q"),
        })
    }
}

/// Collects query pairs, ignoring later occurrences of a key.
fn first_values<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<HashMap<String, String>, D::Error> {
    struct FirstValues;

    impl<'de> Visitor<'de> for FirstValues {
        type Value = HashMap<String, String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("query string pairs")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut values = HashMap::new();
            while let Some((key, value)) = map.next_entry::<String, String>()? {
                values.entry(key).or_insert(value);
            }
            Ok(values)
        }
    }

    deserializer.deserialize_map(FirstValues)
}

/// Records the store starts with.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Laptop".to_string(),
            description: "High-performance laptop with 16GB RAM".to_string(),
            price: Number::from(1200),
            category: "electronics".to_string(),
            in_stock: true,
        },
        Product {
            id: "2".to_string(),
            name: "Smartphone".to_string(),
            description: "Latest model with 128GB storage".to_string(),
            price: Number::from(800),
            category: "electronics".to_string(),
            in_stock: true,
        },
        Product {
            id: "3".to_string(),
            name: "Coffee Maker".to_string(),
            description: "Programmable coffee maker with timer".to_string(),
            price: Number::from(50),
            category: "kitchen".to_string(),
            in_stock: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input() -> ProductInput {
        ProductInput {
            name: "Desk".to_string(),
            description: "Standing desk".to_string(),
            price: Number::from_f64(249.99).unwrap(),
            category: "furniture".to_string(),
            in_stock: true,
        }
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product::with_id("7", input());
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "7",
                "name": "Desk",
                "description": "Standing desk",
                "price": 249.99,
                "category": "furniture",
                "inStock": true
            })
        );
    }

    #[test]
    fn test_integer_price_stays_integer() {
        let product = &seed_products()[0];
        let text = serde_json::to_string(product).unwrap();
        assert!(text.contains("\"price\":1200,"));
    }

    #[test]
    fn test_new_generates_uuid() {
        let a = Product::new(input());
        let b = Product::new(input());
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut product = seed_products().remove(0);
        product.apply(input());
        assert_eq!(product.id, "1");
        assert_eq!(product.name, "Desk");
        assert_eq!(product.category, "furniture");
    }

    #[test]
    fn test_list_query_keeps_first_value() {
        let query: ListQuery =
            serde_json::from_value(json!({ "page": "2", "limit": "5", "other": "x" })).unwrap();
        assert_eq!(query.page.as_deref(), Some("2"));
        assert_eq!(query.limit.as_deref(), Some("5"));

        let query: ListQuery = serde_json::from_str(r#"{"page":"1","page":"2"}"#).unwrap();
        assert_eq!(query.page.as_deref(), Some("1"));
        assert_eq!(query.limit, None);
    }

    #[test]
    fn test_search_query_keeps_first_value() {
        let query: SearchQuery = serde_json::from_str(r#"{"q":"phone","q":"laptop"}"#).unwrap();
        assert_eq!(query.q.as_deref(), Some("phone"));

        let query: SearchQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.q, None);
    }

    #[test]
    fn test_seed_data() {
        let seed = seed_products();
        assert_eq!(seed.len(), 3);
        let ids: Vec<_> = seed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(!seed[2].in_stock);
    }
}
