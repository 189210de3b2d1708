use async_trait::async_trait;

use crate::models::product::{Product, ProductId};

/// Defines the contract for looking up catalog products.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Returns at most `limit` products whose SKU or name contains `query`.
    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<Product>>;

    /// Retrieves a single product.
    ///
    /// # Returns
    /// * `Ok(Some(Product))` - The product exists.
    /// * `Ok(None)` - The id is unknown to the catalog.
    async fn get(&self, id: ProductId) -> anyhow::Result<Option<Product>>;
}
