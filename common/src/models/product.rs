use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Stable key of a catalog product. A cart holds at most one line item per product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A product record supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub sku: String,
    /// Budgeted cost of one unit.
    #[serde(default)]
    pub target_cost_per_unit: Money,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub category: String,
}

impl Product {
    pub fn new(id: u64, product_name: impl Into<String>, target_cost_per_unit: Money) -> Self {
        Self {
            id: ProductId(id),
            product_name: product_name.into(),
            sku: String::new(),
            target_cost_per_unit,
            product_type: String::new(),
            category: String::new(),
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = product_type.into();
        self
    }

    /// Case-insensitive substring match against the SKU and the product name.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.sku.to_lowercase().contains(&needle) || self.product_name.to_lowercase().contains(&needle)
    }
}
