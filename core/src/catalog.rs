use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use sourcing_common::catalog::ProductCatalog;
use sourcing_common::models::product::{Product, ProductId};

/// Product catalog backed by a JSON array of products.
pub struct JsonCatalog {
    products: Vec<Product>,
}

impl JsonCatalog {
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let products: Vec<Product> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse catalog {}", path.display()))?;

        debug!(products = products.len(), path = %path.display(), "catalog loaded");
        Ok(Self::from_products(products))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductCatalog for JsonCatalog {
    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|product| product.matches(query))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get(&self, id: ProductId) -> anyhow::Result<Option<Product>> {
        Ok(self.products.iter().find(|product| product.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CATALOG: &str = r#"[
        { "id": 1, "sku": "GC-IND", "product_name": "GameCube Indigo", "target_cost_per_unit": 70, "category": "Consoles" },
        { "id": 2, "sku": "GC-CTRL", "product_name": "GameCube Controller", "target_cost_per_unit": "18.50" },
        { "id": 3, "sku": "GBA-SP", "product_name": "Game Boy Advance SP", "target_cost_per_unit": 55 }
    ]"#;

    async fn write_catalog() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        tokio::fs::write(&path, CATALOG).await.unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn loads_products_from_file() {
        let (_dir, path) = write_catalog().await;
        let catalog = JsonCatalog::load(&path).await.unwrap();

        assert_eq!(catalog.len(), 3);
        let controller = catalog.get(ProductId(2)).await.unwrap().unwrap();
        assert_eq!(controller.target_cost_per_unit, dec!(18.50));
        assert!(catalog.get(ProductId(9)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_matches_sku_and_name() {
        let (_dir, path) = write_catalog().await;
        let catalog = JsonCatalog::load(&path).await.unwrap();

        assert_eq!(catalog.search("gc-", 10).await.unwrap().len(), 2);
        assert_eq!(catalog.search("advance", 10).await.unwrap()[0].id, ProductId(3));
        assert_eq!(catalog.search("game", 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let err = JsonCatalog::load(Path::new("/nonexistent/catalog.json"))
            .await
            .err()
            .unwrap();

        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }
}
