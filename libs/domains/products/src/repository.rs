use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{Product, ProductInput, seed_products};

/// Repository trait for Product persistence
///
/// The store is an ordered collection: `list` returns records in insertion
/// order. Handlers never see it directly; they go through the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in insertion order
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Append a product
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Replace the fields of an existing product, returns `None` if absent
    async fn update(&self, id: &str, input: ProductInput) -> ProductResult<Option<Product>>;

    /// Remove a product, returns whether it existed
    async fn delete(&self, id: &str) -> ProductResult<bool>;
}

/// In-memory product store, lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the three seed products.
    pub fn with_seed() -> Self {
        Self::from_products(seed_products())
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.clone())
    }

    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        products.push(product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, id: &str, input: ProductInput) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        product.apply(input);

        tracing::info!(product_id = %id, "Updated product");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        match products.iter().position(|p| p.id == id) {
            Some(index) => {
                products.remove(index);
                tracing::info!(product_id = %id, "Deleted product");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    fn input(name: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: "desc".to_string(),
            price: Number::from(10),
            category: "misc".to_string(),
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn test_seeded_store_lists_in_order() {
        let repo = InMemoryProductRepository::with_seed();
        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Laptop", "Smartphone", "Coffee Maker"]);
    }

    #[tokio::test]
    async fn test_insert_appends() {
        let repo = InMemoryProductRepository::with_seed();
        let product = repo.insert(Product::new(input("Lamp"))).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all.last().unwrap().id, product.id);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let repo = InMemoryProductRepository::with_seed();
        assert_eq!(repo.get_by_id("2").await.unwrap().unwrap().name, "Smartphone");
        assert!(repo.get_by_id("999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_in_place() {
        let repo = InMemoryProductRepository::with_seed();
        let updated = repo.update("2", input("Phone")).await.unwrap().unwrap();
        assert_eq!(updated.id, "2");
        assert_eq!(updated.name, "Phone");

        // position is preserved
        let all = repo.list().await.unwrap();
        assert_eq!(all[1].name, "Phone");

        assert!(repo.update("999", input("x")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryProductRepository::with_seed();
        assert!(repo.delete("1").await.unwrap());
        assert!(!repo.delete("1").await.unwrap());
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryProductRepository::new();
        let other = repo.clone();
        other.insert(Product::new(input("Shared"))).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
