//! # Sourcing Common
//!
//! Types shared by every layer of the sourcing workspace.
//!
//! * **[`models`]**: line items, products, order totals and persisted order records.
//! * **[`money`]**: the currency type and its rounding rules.
//! * **[`error`]**: the error taxonomy surfaced to callers.
//! * **[`catalog`]** and **[`ordering`]**: outbound ports implemented by `sourcing-core`.
//! * **[`config`]**: runtime options collected by the command line.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod money;
pub mod ordering;
