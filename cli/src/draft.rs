//! Draft files: a sourcing form saved as JSON.
//!
//! ```json
//! {
//!   "header": { "seller_name": "retro_finds", "market": "eBay" },
//!   "totals": { "sellers_price": 30, "shipping_price": 6, "tax": 4 },
//!   "items": [ { "product_id": 1, "quantity": 2 }, { "product_id": 2, "quantity": 4 } ]
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use sourcing_common::error::SourcingError;
use sourcing_common::models::order::{OrderHeader, OrderTotals};
use sourcing_common::models::product::ProductId;
use sourcing_core::cart::{AddOutcome, CartState};
use sourcing_core::service::SourcingService;

fn one() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct DraftItem {
    pub product_id: ProductId,
    #[serde(default = "one")]
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct Draft {
    #[serde(default)]
    pub header: OrderHeader,
    #[serde(default)]
    pub totals: OrderTotals,
    pub items: Vec<DraftItem>,
}

impl Draft {
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read draft {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("failed to parse draft {}", path.display()))
    }

    /// Replays the draft against a fresh cart, resolving products through the catalog.
    pub async fn into_cart(self, service: &SourcingService) -> Result<CartState, SourcingError> {
        let mut cart = CartState::new();

        for entry in self.items {
            match service.add_product(&mut cart, entry.product_id).await? {
                AddOutcome::Added => cart.update_quantity(entry.product_id, entry.quantity)?,
                AddOutcome::AlreadyInCart(warning) => {
                    warn!(
                        "{} ({}) is listed twice, keeping the first entry",
                        warning.product_name, warning.item_id
                    );
                }
            }
        }

        cart.set_totals(self.totals)?;
        cart.set_header(self.header)?;
        Ok(cart)
    }
}
