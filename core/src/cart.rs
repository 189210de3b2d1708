//! # Cart State
//!
//! The ordered collection of line items behind a sourcing form, together with the
//! order-level totals and header.
//!
//! Every successful mutation re-runs [`allocation::allocate`] over the full item set before
//! returning, and writes each item's prorated `sourced_price`. Derived values read from the
//! cart are therefore never older than the last mutation.
//!
//! A cart is `Editable` until [`CartState::mark_submitted`] records the order id returned
//! by the order backend. After that every mutation fails with
//! [`SourcingError::InvalidState`] and leaves the cart untouched.

use tracing::{debug, warn};

use sourcing_common::error::{InvalidInput, SourcingError};
use sourcing_common::models::cart::CartStatus;
use sourcing_common::models::item::LineItem;
use sourcing_common::models::order::{NewOrder, NewOrderItem, OrderHeader, OrderId, OrderTotals};
use sourcing_common::models::product::{Product, ProductId};
use sourcing_common::money::Money;

use crate::allocation::{self, AllocationResult};

/// Raised instead of adding a product that is already in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateItemWarning {
    pub item_id: ProductId,
    pub product_name: String,
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyInCart(DuplicateItemWarning),
}

#[derive(Debug, Clone, Default)]
pub struct CartState {
    items: Vec<LineItem>,
    totals: OrderTotals,
    header: OrderHeader,
    status: CartStatus,
    order_id: Option<OrderId>,
    allocation: AllocationResult,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    pub fn header(&self) -> &OrderHeader {
        &self.header
    }

    pub fn status(&self) -> CartStatus {
        self.status
    }

    /// Order id assigned on submission.
    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    /// Allocation over the current items and totals.
    pub fn allocation(&self) -> &AllocationResult {
        &self.allocation
    }

    pub fn total_target_cost(&self) -> Money {
        self.allocation.total_target_cost
    }

    /// Appends `product` with one unit.
    ///
    /// A product already in the cart is left as is and reported through
    /// [`AddOutcome::AlreadyInCart`].
    pub fn add_item(&mut self, product: Product) -> Result<AddOutcome, SourcingError> {
        self.ensure_editable()?;

        if let Some(existing) = self.item(product.id) {
            warn!(item = %existing.id, name = %existing.product_name, "product already in cart");
            return Ok(AddOutcome::AlreadyInCart(DuplicateItemWarning {
                item_id: existing.id,
                product_name: existing.product_name.clone(),
            }));
        }

        if product.product_name.trim().is_empty() {
            return Err(InvalidInput::MissingProductName(product.id).into());
        }
        let item = LineItem::from(product);
        item.validate()?;

        let mut items = self.items.clone();
        items.push(item);
        self.commit(items, self.totals)?;
        Ok(AddOutcome::Added)
    }

    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> Result<(), SourcingError> {
        self.ensure_editable()?;
        if quantity < 1 {
            return Err(InvalidInput::ZeroQuantity { item_id: id }.into());
        }

        let mut items = self.items.clone();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(InvalidInput::UnknownItem(id))?;
        item.quantity_needed = quantity;
        self.commit(items, self.totals)
    }

    /// Removes the item with `id`, returning it. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: ProductId) -> Result<Option<LineItem>, SourcingError> {
        self.ensure_editable()?;

        let Some(position) = self.items.iter().position(|item| item.id == id) else {
            return Ok(None);
        };
        let mut items = self.items.clone();
        let mut removed = items.remove(position);
        removed.sourced_price = None;
        self.commit(items, self.totals)?;
        Ok(Some(removed))
    }

    pub fn set_totals(&mut self, totals: OrderTotals) -> Result<(), SourcingError> {
        self.ensure_editable()?;
        self.commit(self.items.clone(), totals)
    }

    pub fn set_header(&mut self, header: OrderHeader) -> Result<(), SourcingError> {
        self.ensure_editable()?;
        self.header = header;
        Ok(())
    }

    /// Records a successful submission. Happens once; the cart is read-only afterwards.
    pub fn mark_submitted(&mut self, order_id: OrderId) -> Result<(), SourcingError> {
        self.ensure_editable()?;
        self.status = CartStatus::Submitted;
        self.order_id = Some(order_id);
        debug!(%order_id, items = self.items.len(), "cart submitted");
        Ok(())
    }

    /// Builds the payload for the order gateway, with every cost component prorated per item.
    pub fn to_new_order(&self) -> Result<NewOrder, SourcingError> {
        if self.items.is_empty() {
            return Err(InvalidInput::EmptyCart.into());
        }

        let items = self
            .items
            .iter()
            .zip(&self.allocation.items)
            .map(|(item, alloc)| NewOrderItem {
                product_id: item.id,
                product_name: item.product_name.clone(),
                sku: item.sku.clone(),
                quantity_needed: item.quantity_needed,
                target_cost_per_unit: item.target_cost_per_unit,
                sourced_price: alloc.seller_share,
                shipping_charges: alloc.shipping_share,
                tax: alloc.tax_share,
                product_type: item.product_type.clone(),
                category: item.category.clone(),
            })
            .collect();

        Ok(NewOrder {
            header: self.header.clone(),
            totals: self.totals,
            items,
        })
    }

    fn ensure_editable(&self) -> Result<(), SourcingError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(SourcingError::InvalidState {
                status: self.status,
            })
        }
    }

    /// Allocates over the candidate state and only then replaces the current one.
    fn commit(&mut self, mut items: Vec<LineItem>, totals: OrderTotals) -> Result<(), SourcingError> {
        let allocation = allocation::allocate(&totals, &items)?;
        for (item, alloc) in items.iter_mut().zip(&allocation.items) {
            item.sourced_price = Some(alloc.allocated_actual_cost);
        }

        self.items = items;
        self.totals = totals;
        self.allocation = allocation;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(id: u64, target: Money) -> Product {
        Product::new(id, format!("Product {id}"), target).with_sku(format!("SKU-{id}"))
    }

    fn cart_with(products: &[(u64, Money)]) -> CartState {
        let mut cart = CartState::new();
        for &(id, target) in products {
            assert_eq!(cart.add_item(product(id, target)).unwrap(), AddOutcome::Added);
        }
        cart
    }

    #[test]
    fn new_cart_is_empty_and_editable() {
        let cart = CartState::new();

        assert!(cart.is_empty());
        assert_eq!(cart.status(), CartStatus::Editable);
        assert_eq!(cart.allocation().efficiency_percentage, Money::ZERO);
    }

    #[test]
    fn added_item_starts_with_one_unit() {
        let cart = cart_with(&[(1, dec!(10))]);

        let item = cart.item(ProductId(1)).unwrap();
        assert_eq!(item.quantity_needed, 1);
        assert_eq!(cart.total_target_cost(), dec!(10));
    }

    #[test]
    fn duplicate_add_is_a_warning_not_a_change() {
        let mut cart = cart_with(&[(1, dec!(10))]);
        cart.update_quantity(ProductId(1), 3).unwrap();

        let outcome = cart.add_item(product(1, dec!(10))).unwrap();

        assert_eq!(
            outcome,
            AddOutcome::AlreadyInCart(DuplicateItemWarning {
                item_id: ProductId(1),
                product_name: "Product 1".into(),
            })
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item(ProductId(1)).unwrap().quantity_needed, 3);
    }

    #[test]
    fn add_rejects_nameless_or_negative_products() {
        let mut cart = CartState::new();

        let nameless = Product::new(5, "  ", dec!(1));
        assert!(matches!(
            cart.add_item(nameless).unwrap_err().invalid_input(),
            Some(InvalidInput::MissingProductName(_))
        ));
        assert!(cart.add_item(product(6, dec!(-1))).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn mutations_refresh_sourced_prices() {
        let mut cart = cart_with(&[(1, dec!(10)), (2, dec!(5))]);
        cart.set_totals(OrderTotals::new(dec!(30), dec!(6), dec!(4))).unwrap();
        assert_eq!(cart.item(ProductId(1)).unwrap().sourced_price, Some(dec!(26.67)));

        cart.update_quantity(ProductId(1), 2).unwrap();
        cart.update_quantity(ProductId(2), 4).unwrap();

        assert_eq!(cart.item(ProductId(1)).unwrap().sourced_price, Some(dec!(20)));
        assert_eq!(cart.item(ProductId(2)).unwrap().sourced_price, Some(dec!(20)));
        assert_eq!(cart.allocation().aggregate_efficiency, Money::ZERO);
    }

    #[test]
    fn update_quantity_validates_before_changing() {
        let mut cart = cart_with(&[(1, dec!(10))]);

        let err = cart.update_quantity(ProductId(1), 0).unwrap_err();
        assert!(matches!(err.invalid_input(), Some(InvalidInput::ZeroQuantity { .. })));

        let err = cart.update_quantity(ProductId(9), 2).unwrap_err();
        assert_eq!(err.invalid_input(), Some(&InvalidInput::UnknownItem(ProductId(9))));

        assert_eq!(cart.item(ProductId(1)).unwrap().quantity_needed, 1);
    }

    #[test]
    fn removing_last_item_falls_back_to_zero_baseline() {
        let mut cart = cart_with(&[(1, dec!(10))]);
        cart.set_totals(OrderTotals::new(dec!(8), dec!(0), dec!(0))).unwrap();

        let removed = cart.remove_item(ProductId(1)).unwrap();

        assert_eq!(removed.map(|item| item.id), Some(ProductId(1)));
        assert!(cart.is_empty());
        assert_eq!(cart.allocation().total_target_cost, Money::ZERO);
        assert_eq!(cart.allocation().aggregate_efficiency, dec!(-8));
        assert_eq!(cart.allocation().efficiency_percentage, Money::ZERO);
    }

    #[test]
    fn removing_unknown_item_is_a_no_op() {
        let mut cart = cart_with(&[(1, dec!(10))]);

        assert_eq!(cart.remove_item(ProductId(2)).unwrap(), None);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn negative_totals_are_rejected_and_not_stored() {
        let mut cart = cart_with(&[(1, dec!(10))]);
        cart.set_totals(OrderTotals::new(dec!(5), dec!(1), dec!(0))).unwrap();

        let result = cart.set_totals(OrderTotals::new(dec!(-5), dec!(1), dec!(0)));

        assert!(result.is_err());
        assert_eq!(cart.totals().sellers_price, dec!(5));
        assert_eq!(cart.allocation().total_actual_cost, dec!(6));
    }

    #[test]
    fn submitted_cart_rejects_every_mutation() {
        let mut cart = cart_with(&[(1, dec!(10)), (2, dec!(4))]);
        cart.mark_submitted(OrderId(77)).unwrap();
        let before = cart.items().to_vec();

        let is_invalid_state =
            |err: SourcingError| matches!(err, SourcingError::InvalidState { status: CartStatus::Submitted });

        assert!(is_invalid_state(cart.add_item(product(3, dec!(1))).unwrap_err()));
        assert!(is_invalid_state(cart.update_quantity(ProductId(1), 5).unwrap_err()));
        assert!(is_invalid_state(cart.remove_item(ProductId(2)).unwrap_err()));
        assert!(is_invalid_state(cart.set_totals(OrderTotals::default()).unwrap_err()));
        assert!(is_invalid_state(cart.set_header(OrderHeader::default()).unwrap_err()));
        assert!(is_invalid_state(cart.mark_submitted(OrderId(78)).unwrap_err()));

        assert_eq!(cart.items(), before.as_slice());
        assert_eq!(cart.order_id(), Some(OrderId(77)));
    }

    #[test]
    fn new_order_carries_prorated_components() {
        let mut cart = cart_with(&[(1, dec!(30)), (2, dec!(10))]);
        cart.set_totals(OrderTotals::new(dec!(20), dec!(8), dec!(4))).unwrap();

        let order = cart.to_new_order().unwrap();

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].sourced_price, dec!(15));
        assert_eq!(order.items[0].shipping_charges, dec!(6));
        assert_eq!(order.items[0].tax, dec!(3));
        assert_eq!(order.items[1].sku, "SKU-2");
        assert_eq!(order.totals.total_actual_cost(), Ok(dec!(32)));
    }

    #[test]
    fn empty_cart_has_no_order() {
        let err = CartState::new().to_new_order().unwrap_err();
        assert_eq!(err.invalid_input(), Some(&InvalidInput::EmptyCart));
    }

    #[test]
    fn totals_beyond_range_are_rejected_and_not_stored() {
        let mut cart = cart_with(&[(1, dec!(10))]);
        cart.set_totals(OrderTotals::new(dec!(8), dec!(1), dec!(1))).unwrap();

        let err = cart
            .set_totals(OrderTotals::new(Money::MAX, Money::MAX, dec!(0)))
            .unwrap_err();

        assert_eq!(
            err.invalid_input(),
            Some(&InvalidInput::AmountOutOfRange { field: "total_actual_cost" })
        );
        assert_eq!(cart.allocation().total_actual_cost, dec!(10));
        assert_eq!(cart.item(ProductId(1)).unwrap().sourced_price, Some(dec!(10)));
    }
}
