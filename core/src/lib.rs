//! # Sourcing Core
//!
//! The cost model of a sourcing request and the services built on it.
//!
//! * **[`allocation`]**: prorates order-level costs over line items and derives efficiency.
//! * **[`cart`]**: the editable collection of line items behind a sourcing form.
//! * **[`service`]**: use cases wiring the cart to the catalog and order ports.
//! * **[`report`]**: savings aggregated over persisted orders.
//! * **[`catalog`]** and **[`outbox`]**: concrete implementations of the outbound ports.

pub mod allocation;
pub mod cart;
pub mod catalog;
pub mod outbox;
pub mod report;
pub mod service;
