//! # Sourcing Service
//!
//! Implements the "create a sourcing request" use case on top of the outbound ports.
//!
//! The service owns no cart. Callers keep their [`CartState`] and hand it in, so a cart
//! can be edited freely between calls and only touches the network on submission.

use tracing::{debug, info};

use sourcing_common::catalog::ProductCatalog;
use sourcing_common::config::DEFAULT_SEARCH_LIMIT;
use sourcing_common::error::{InvalidInput, SourcingError};
use sourcing_common::models::order::OrderId;
use sourcing_common::models::product::{Product, ProductId};
use sourcing_common::ordering::OrderGateway;

use crate::cart::{AddOutcome, CartState};

/// Queries shorter than this are not sent to the catalog.
pub const MIN_QUERY_LEN: usize = 2;

pub struct SourcingService {
    catalog: Box<dyn ProductCatalog>,
    gateway: Box<dyn OrderGateway>,
    search_limit: usize,
}

impl SourcingService {
    pub fn new(catalog: Box<dyn ProductCatalog>, gateway: Box<dyn OrderGateway>) -> Self {
        Self {
            catalog,
            gateway,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_search_limit(mut self, search_limit: usize) -> Self {
        self.search_limit = search_limit;
        self
    }

    /// Searches the catalog by SKU or name. Short queries yield no results.
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, SourcingError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            debug!(query, "query too short, skipping catalog search");
            return Ok(Vec::new());
        }

        self.catalog
            .search(query, self.search_limit)
            .await
            .map_err(SourcingError::Catalog)
    }

    /// Resolves `id` through the catalog and adds the product to `cart`.
    pub async fn add_product(&self, cart: &mut CartState, id: ProductId) -> Result<AddOutcome, SourcingError> {
        let product = self
            .catalog
            .get(id)
            .await
            .map_err(SourcingError::Catalog)?
            .ok_or(InvalidInput::UnknownProduct(id))?;

        cart.add_item(product)
    }

    /// Sends `cart` to the order gateway.
    ///
    /// The cart becomes `Submitted` only once the gateway acknowledged the order. On any
    /// failure it stays editable and nothing is retried.
    pub async fn submit(&self, cart: &mut CartState) -> Result<OrderId, SourcingError> {
        if !cart.status().is_editable() {
            return Err(SourcingError::InvalidState {
                status: cart.status(),
            });
        }
        let order = cart.to_new_order()?;

        let order_id = self
            .gateway
            .create_order(&order)
            .await
            .map_err(SourcingError::Submission)?;

        cart.mark_submitted(order_id)?;
        info!(
            %order_id,
            items = order.items.len(),
            efficiency = %cart.allocation().aggregate_efficiency,
            "sourcing request created"
        );
        Ok(order_id)
    }
}
