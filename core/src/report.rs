//! # Savings Report
//!
//! Aggregates realized savings over persisted orders for the manager dashboard.
//!
//! Only orders that were actually paid for (`Purchased`, `Dropshipped`) contribute to
//! savings. Order counts per sourcer and purchaser include every status.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use sourcing_common::error::InvalidInput;
use sourcing_common::models::order::OrderRecord;
use sourcing_common::money::{self, Money};

use crate::allocation;

/// Group key for orders without a market.
pub const UNSPECIFIED: &str = "Unspecified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSavings {
    pub key: String,
    pub total_savings: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SavingsReport {
    /// Orders whose savings were counted.
    pub realized_orders: usize,
    pub total_savings: Money,
    pub total_target_cost: Money,
    pub efficiency_percentage: Decimal,
    pub by_sourcer: Vec<GroupSavings>,
    pub by_market: Vec<GroupSavings>,
    pub by_category: Vec<GroupSavings>,
    pub orders_per_sourcer: Vec<GroupCount>,
    pub orders_per_purchaser: Vec<GroupCount>,
}

impl SavingsReport {
    /// Fails when a realized order holds values the allocation engine rejects.
    pub fn build(orders: &[OrderRecord]) -> Result<Self, InvalidInput> {
        let mut report = SavingsReport::default();
        let mut by_sourcer: BTreeMap<String, Money> = BTreeMap::new();
        let mut by_market: BTreeMap<String, Money> = BTreeMap::new();
        let mut by_category: BTreeMap<String, Money> = BTreeMap::new();
        let mut per_sourcer: BTreeMap<String, usize> = BTreeMap::new();
        let mut per_purchaser: BTreeMap<String, usize> = BTreeMap::new();

        for order in orders {
            *per_sourcer.entry(order.sourcer.clone()).or_default() += 1;
            if let Some(purchaser) = &order.purchaser {
                *per_purchaser.entry(purchaser.clone()).or_default() += 1;
            }

            if !order.status.is_realized() {
                continue;
            }

            let result = allocation::allocate(&order.totals, &order.items)?;
            let savings = result.aggregate_efficiency;

            report.realized_orders += 1;
            report.total_savings = money::add(report.total_savings, savings, "total_savings")?;
            report.total_target_cost =
                money::add(report.total_target_cost, result.total_target_cost, "total_target_cost")?;

            accumulate(&mut by_sourcer, order.sourcer.clone(), savings)?;
            let market = order
                .market
                .map(|market| market.to_string())
                .unwrap_or_else(|| UNSPECIFIED.to_string());
            accumulate(&mut by_market, market, savings)?;

            for (item, alloc) in order.items.iter().zip(&result.items) {
                let category = if item.category.trim().is_empty() {
                    UNSPECIFIED.to_string()
                } else {
                    item.category.clone()
                };
                accumulate(&mut by_category, category, alloc.item_efficiency)?;
            }
        }

        report.efficiency_percentage = money::percentage(report.total_savings, report.total_target_cost)?;
        report.by_sourcer = into_savings(by_sourcer);
        report.by_market = into_savings(by_market);
        report.by_category = into_savings(by_category);
        report.orders_per_sourcer = into_counts(per_sourcer);
        report.orders_per_purchaser = into_counts(per_purchaser);
        Ok(report)
    }
}

fn accumulate(groups: &mut BTreeMap<String, Money>, key: String, savings: Money) -> Result<(), InvalidInput> {
    let total = groups.entry(key).or_default();
    *total = money::add(*total, savings, "group_savings")?;
    Ok(())
}

fn into_savings(groups: BTreeMap<String, Money>) -> Vec<GroupSavings> {
    groups
        .into_iter()
        .map(|(key, total_savings)| GroupSavings { key, total_savings })
        .collect()
}

fn into_counts(groups: BTreeMap<String, usize>) -> Vec<GroupCount> {
    groups
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect()
}
