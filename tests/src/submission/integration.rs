#![cfg(test)]
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal_macros::dec;
use sourcing_common::error::SourcingError;
use sourcing_common::models::cart::CartStatus;
use sourcing_common::models::order::{Market, NewOrder, OrderHeader, OrderId, OrderTotals};
use sourcing_common::models::product::ProductId;
use sourcing_common::ordering::OrderGateway;
use sourcing_core::cart::{AddOutcome, CartState};
use sourcing_core::outbox::{InMemoryOrders, JsonOutbox};
use sourcing_core::service::SourcingService;

use crate::utils;

/// Lets a test keep a handle on the gateway after boxing it into the service.
struct Shared(Arc<InMemoryOrders>);

#[async_trait]
impl OrderGateway for Shared {
    async fn create_order(&self, order: &NewOrder) -> anyhow::Result<OrderId> {
        self.0.create_order(order).await
    }
}

async fn filled_cart(service: &SourcingService) -> CartState {
    let mut cart = CartState::new();
    for id in [1, 2] {
        let outcome = service.add_product(&mut cart, ProductId(id)).await.unwrap();
        assert_eq!(outcome, AddOutcome::Added);
    }
    cart.update_quantity(ProductId(1), 2).unwrap();
    cart.update_quantity(ProductId(2), 4).unwrap();
    cart.set_totals(OrderTotals::new(dec!(30), dec!(6), dec!(4))).unwrap();
    cart.set_header(OrderHeader {
        seller_name: Some("retro_finds".into()),
        market: Some(Market::EBay),
        ..Default::default()
    })
    .unwrap();
    cart
}

/// Search, add, edit, and submit a cart end to end against the in-memory gateway.
#[tokio::test]
async fn sourcing_form_round_trip() {
    let gateway = Arc::new(InMemoryOrders::new());
    let service = SourcingService::new(Box::new(utils::catalog()), Box::new(Shared(gateway.clone())));

    let matches = service.search_products("n64").await.unwrap();
    assert_eq!(matches.len(), 3);

    let mut cart = filled_cart(&service).await;
    assert_eq!(cart.allocation().total_target_cost, dec!(40));
    assert_eq!(cart.allocation().aggregate_efficiency, dec!(0));

    let order_id = service.submit(&mut cart).await.unwrap();

    assert_eq!(order_id, OrderId(1));
    assert_eq!(cart.status(), CartStatus::Submitted);

    let orders = gateway.orders();
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.header.seller_name.as_deref(), Some("retro_finds"));
    assert_eq!(order.items[0].sourced_price, dec!(15));
    assert_eq!(order.items[0].shipping_charges, dec!(3));
    assert_eq!(order.items[0].tax, dec!(2));
    assert_eq!(order.items[1].quantity_needed, 4);
}

#[tokio::test]
async fn submitted_cart_stays_frozen() {
    let service = SourcingService::new(Box::new(utils::catalog()), Box::new(InMemoryOrders::new()));
    let mut cart = filled_cart(&service).await;
    service.submit(&mut cart).await.unwrap();
    let items = cart.items().to_vec();

    let err = service.add_product(&mut cart, ProductId(3)).await.unwrap_err();
    assert!(matches!(err, SourcingError::InvalidState { .. }));
    assert!(cart.update_quantity(ProductId(1), 9).is_err());
    assert!(cart.remove_item(ProductId(2)).is_err());
    assert!(cart.set_totals(OrderTotals::default()).is_err());

    assert_eq!(cart.items(), items.as_slice());
}

#[tokio::test]
async fn zero_cost_item_keeps_cart_submittable() {
    let service = SourcingService::new(Box::new(utils::catalog()), Box::new(InMemoryOrders::new()));
    let mut cart = CartState::new();
    let _ = service.add_product(&mut cart, ProductId(3)).await.unwrap();
    cart.set_totals(OrderTotals::new(dec!(5), dec!(0), dec!(0))).unwrap();

    assert_eq!(cart.allocation().efficiency_percentage, dec!(0));
    assert_eq!(cart.allocation().aggregate_efficiency, dec!(-5));
    assert_eq!(cart.item(ProductId(3)).unwrap().sourced_price, Some(dec!(0)));

    assert!(service.submit(&mut cart).await.is_ok());
}

#[tokio::test]
async fn outbox_receives_submitted_orders() {
    let dir = tempfile::tempdir().unwrap();
    let outbox = JsonOutbox::new(dir.path());
    let path = outbox.order_path(OrderId(1));
    let service = SourcingService::new(Box::new(utils::catalog()), Box::new(outbox));

    let mut cart = filled_cart(&service).await;
    let order_id = service.submit(&mut cart).await.unwrap();

    assert_eq!(order_id, OrderId(1));
    let raw = std::fs::read_to_string(path).unwrap();
    let stored: NewOrder = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.items.len(), 2);
    assert_eq!(stored.totals.total_actual_cost(), Ok(dec!(40)));
    assert_eq!(stored.header.market, Some(Market::EBay));
}
