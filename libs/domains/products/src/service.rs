//! Product Service - Business logic layer

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{ListQuery, Product, ProductInput, ProductPage};
use crate::repository::ProductRepository;

/// Message returned when a search has no term.
pub const SEARCH_TERM_REQUIRED: &str = "Query parameter \"q\" is required for search.";

/// Parse a query value as a positive integer, `None` for anything else.
fn positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

/// Product service providing business logic operations
///
/// The service layer handles pagination, search and not-found mapping on top
/// of the repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// One page of products.
    ///
    /// `page` defaults to 1 and `limit` to the size of the collection. A page
    /// past the end yields an empty `data` rather than an error.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ListQuery) -> ProductResult<ProductPage> {
        let products = self.repository.list().await?;
        let total = products.len();

        let page = positive(query.page.as_deref()).unwrap_or(1);
        let limit = positive(query.limit.as_deref()).unwrap_or(total);

        let start = (page - 1).saturating_mul(limit);
        let end = start.saturating_add(limit).min(total);
        let data = if start < end {
            products[start..end].to_vec()
        } else {
            Vec::new()
        };

        Ok(ProductPage {
            page,
            limit,
            total,
            data,
        })
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Products whose category equals `category` exactly
    #[instrument(skip(self))]
    pub async fn get_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let products = self.repository.list().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    /// Case-insensitive name search
    #[instrument(skip(self))]
    pub async fn search_products(&self, term: Option<&str>) -> ProductResult<Vec<Product>> {
        let term = match term {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return Err(ProductError::Validation(SEARCH_TERM_REQUIRED.to_string())),
        };

        let products = self.repository.list().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&term))
            .collect())
    }

    /// Number of products per category
    #[instrument(skip(self))]
    pub async fn category_stats(&self) -> ProductResult<BTreeMap<String, usize>> {
        let products = self.repository.list().await?;
        let mut stats = BTreeMap::new();
        for product in products {
            *stats.entry(product.category).or_insert(0) += 1;
        }
        Ok(stats)
    }

    /// Create a new product with a fresh id
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        self.repository.insert(Product::new(input)).await
    }

    /// Update an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: ProductInput) -> ProductResult<Product> {
        self.repository
            .update(id, input)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id.to_string()))
        }
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
