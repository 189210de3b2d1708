//! # Domain Models
//!
//! ## Core Entities
//! * [`item::LineItem`]: one product in a cart, with the quantity needed.
//! * [`order::OrderRecord`]: a persisted order as returned by the order backend.
//!
//! ## Value Objects
//! * [`product::Product`]: a catalog record used to create line items.
//! * [`order::OrderTotals`]: the costs actually paid for a whole order.
//! * [`order::OrderHeader`]: seller and listing details of an order.
//! * [`order::NewOrder`]: the payload handed to the order gateway.

pub mod cart;
pub mod item;
pub mod order;
pub mod product;
