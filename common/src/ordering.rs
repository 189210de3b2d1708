use async_trait::async_trait;

use crate::models::order::{NewOrder, OrderId};

/// Defines the contract for persisting a finalized cart as an order.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Creates the order and returns the identifier the backend assigned to it.
    ///
    /// Creation is final for the submitted cart; a failure means nothing was persisted.
    async fn create_order(&self, order: &NewOrder) -> anyhow::Result<OrderId>;
}
