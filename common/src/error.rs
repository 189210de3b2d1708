//! # Error Taxonomy
//!
//! * [`InvalidInput`]: a value violated an invariant of the cart or the allocation engine.
//!   Never clamped or repaired, always returned to the caller.
//! * [`SourcingError::InvalidState`]: a mutation was attempted on a submitted cart.
//! * [`SourcingError::Catalog`] / [`SourcingError::Submission`]: an outbound port failed.
//!
//! Adding a product that is already in the cart is not an error. It is reported as a
//! `DuplicateItemWarning` value by the cart itself.

use thiserror::Error;

use crate::models::cart::CartStatus;
use crate::models::product::ProductId;
use crate::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("item {item_id}: quantity needed must be at least 1")]
    ZeroQuantity { item_id: ProductId },

    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: Money },

    #[error("item {item_id}: {field} must not be negative (got {value})")]
    NegativeItemAmount {
        item_id: ProductId,
        field: &'static str,
        value: Money,
    },

    #[error("{field} exceeds the supported amount range")]
    AmountOutOfRange { field: &'static str },

    #[error("product {0} has no name")]
    MissingProductName(ProductId),

    #[error("item {0} is not in the cart")]
    UnknownItem(ProductId),

    #[error("product {0} does not exist in the catalog")]
    UnknownProduct(ProductId),

    #[error("cart is empty")]
    EmptyCart,
}

#[derive(Debug, Error)]
pub enum SourcingError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("cart is {status} and can no longer be modified")]
    InvalidState { status: CartStatus },

    #[error("product catalog request failed: {0:#}")]
    Catalog(#[source] anyhow::Error),

    #[error("order submission failed: {0:#}")]
    Submission(#[source] anyhow::Error),
}

impl SourcingError {
    pub fn invalid_input(&self) -> Option<&InvalidInput> {
        match self {
            SourcingError::InvalidInput(input) => Some(input),
            _ => None,
        }
    }
}
