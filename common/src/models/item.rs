use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;
use crate::models::product::{Product, ProductId};
use crate::money::Money;

fn default_quantity() -> u32 {
    1
}

/// One product in a cart or order.
///
/// The item's target total (`target_cost_per_unit * quantity_needed`) is always derived,
/// see [`LineItem::item_target_total`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default = "default_quantity")]
    pub quantity_needed: u32,
    #[serde(default)]
    pub target_cost_per_unit: Money,
    /// Prorated actual cost. Written by the allocation engine, `None` until the first run.
    #[serde(default)]
    pub sourced_price: Option<Money>,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub category: String,
}

impl From<Product> for LineItem {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            product_name: product.product_name,
            sku: product.sku,
            quantity_needed: 1,
            target_cost_per_unit: product.target_cost_per_unit,
            sourced_price: None,
            product_type: product.product_type,
            category: product.category,
        }
    }
}

impl LineItem {
    pub fn item_target_total(&self) -> Result<Money, InvalidInput> {
        self.target_cost_per_unit
            .checked_mul(Money::from(self.quantity_needed))
            .ok_or(InvalidInput::AmountOutOfRange {
                field: "item_target_total",
            })
    }

    /// Checks the invariants the allocation engine relies on.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.quantity_needed < 1 {
            return Err(InvalidInput::ZeroQuantity { item_id: self.id });
        }
        if self.target_cost_per_unit < Money::ZERO {
            return Err(InvalidInput::NegativeItemAmount {
                item_id: self.id,
                field: "target_cost_per_unit",
                value: self.target_cost_per_unit,
            });
        }
        if let Some(price) = self.sourced_price {
            if price < Money::ZERO {
                return Err(InvalidInput::NegativeItemAmount {
                    item_id: self.id,
                    field: "sourced_price",
                    value: price,
                });
            }
        }
        Ok(())
    }
}
