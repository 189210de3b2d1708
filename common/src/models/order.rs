use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;
use crate::models::item::LineItem;
use crate::models::product::ProductId;
use crate::money::{self, Money};

/// Identifier assigned by the order backend on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SID-{}", self.0)
    }
}

/// Costs actually paid for a whole order, entered once per order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    #[serde(default)]
    pub sellers_price: Money,
    #[serde(default)]
    pub shipping_price: Money,
    #[serde(default)]
    pub tax: Money,
}

impl OrderTotals {
    pub fn new(sellers_price: Money, shipping_price: Money, tax: Money) -> Self {
        Self {
            sellers_price,
            shipping_price,
            tax,
        }
    }

    pub fn total_actual_cost(&self) -> Result<Money, InvalidInput> {
        money::sum([self.sellers_price, self.shipping_price, self.tax], "total_actual_cost")
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        let fields = [
            ("sellers_price", self.sellers_price),
            ("shipping_price", self.shipping_price),
            ("tax", self.tax),
        ];
        for (field, value) in fields {
            if value < Money::ZERO {
                return Err(InvalidInput::NegativeAmount { field, value });
            }
        }
        Ok(())
    }
}

/// Marketplace a listing was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Market {
    Mercari,
    #[serde(rename = "eBay")]
    EBay,
    Facebook,
    Etsy,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Market::Mercari => "Mercari",
            Market::EBay => "eBay",
            Market::Facebook => "Facebook",
            Market::Etsy => "Etsy",
        };
        f.write_str(name)
    }
}

/// Seller and listing details of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHeader {
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub listing_link: Option<String>,
    #[serde(default)]
    pub market: Option<Market>,
    #[serde(default)]
    pub origin: Option<String>,
}

/// Workflow status of a persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Assigned,
    Offer,
    Purchased,
    Disapproved,
    Sold,
    Hold,
    #[serde(rename = "Seller Rejected")]
    SellerRejected,
    Dropshipped,
    Returned,
}

impl OrderStatus {
    /// Whether the order's money was actually spent, making its savings final.
    pub fn is_realized(self) -> bool {
        matches!(self, OrderStatus::Purchased | OrderStatus::Dropshipped)
    }
}

/// One line of a [`NewOrder`], carrying its prorated share of every order-level cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub sku: String,
    pub quantity_needed: u32,
    pub target_cost_per_unit: Money,
    pub sourced_price: Money,
    pub shipping_charges: Money,
    pub tax: Money,
    pub product_type: String,
    pub category: String,
}

/// Payload accepted by the order gateway when a cart is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(flatten)]
    pub header: OrderHeader,
    #[serde(flatten)]
    pub totals: OrderTotals,
    pub items: Vec<NewOrderItem>,
}

/// A persisted order, as listed by the order backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub sourcer: String,
    #[serde(default)]
    pub purchaser: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub market: Option<Market>,
    #[serde(default)]
    pub totals: OrderTotals,
    #[serde(default)]
    pub items: Vec<LineItem>,
}
