//! # Cost Allocation Engine
//!
//! Distributes the costs actually paid for an order (seller price, shipping, tax) over its
//! line items, proportionally to each item's share of the order's total target cost, and
//! derives efficiency (target minus actual) per item and for the whole order.
//!
//! The engine is a pure function of `(OrderTotals, &[LineItem])`. It holds no state, so a
//! caller can re-run it after every edit without accumulating drift.
//!
//! ## Rounding
//! Every cost component is prorated on its own and each share is rounded to cents. The
//! rounding residual of a component is handed out one cent at a time, starting with the
//! last item that carries target weight and walking backwards, so the shares of a
//! component always add up to the order-level amount. Items with zero target weight never
//! absorb cost.
//!
//! ## Zero baseline
//! When the total target cost is zero (empty cart, or only zero-cost items) nothing is
//! prorated: every item is allocated zero, the aggregate efficiency is `-total_actual_cost`,
//! and every percentage is zero.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use sourcing_common::error::InvalidInput;
use sourcing_common::models::item::LineItem;
use sourcing_common::models::order::OrderTotals;
use sourcing_common::models::product::ProductId;
use sourcing_common::money::{self, CENT, Money};

/// Allocation and efficiency of a single line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemAllocation {
    pub item_id: ProductId,
    pub item_target_total: Money,
    /// Share of the order's total target cost carried by this item, in `[0, 1]`.
    pub ratio: Decimal,
    pub seller_share: Money,
    pub shipping_share: Money,
    pub tax_share: Money,
    /// Sum of the three shares.
    pub allocated_actual_cost: Money,
    pub item_efficiency: Money,
    pub efficiency_percentage: Decimal,
}

/// Result of one [`allocate`] run. Items appear in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllocationResult {
    pub items: Vec<ItemAllocation>,
    pub total_target_cost: Money,
    pub total_actual_cost: Money,
    /// Positive means under budget.
    pub aggregate_efficiency: Money,
    pub efficiency_percentage: Decimal,
}

impl AllocationResult {
    pub fn item(&self, id: ProductId) -> Option<&ItemAllocation> {
        self.items.iter().find(|alloc| alloc.item_id == id)
    }

    /// Whether costs were actually prorated, i.e. the total target cost was positive.
    pub fn is_prorated(&self) -> bool {
        self.total_target_cost > Money::ZERO
    }

    pub fn total_allocated(&self) -> Money {
        self.items.iter().map(|alloc| alloc.allocated_actual_cost).sum()
    }
}

/// Sum of `target_cost_per_unit * quantity_needed` over all items. Zero for no items.
pub fn compute_total_target_cost(items: &[LineItem]) -> Result<Money, InvalidInput> {
    let totals = items
        .iter()
        .map(LineItem::item_target_total)
        .collect::<Result<Vec<_>, _>>()?;
    money::sum(totals, "total_target_cost")
}

/// Prorates `totals` over `items` and computes efficiency.
///
/// Fails when an item has a quantity below 1, when any monetary input is negative, or when
/// a derived amount leaves the range of [`Decimal`].
pub fn allocate(totals: &OrderTotals, items: &[LineItem]) -> Result<AllocationResult, InvalidInput> {
    totals.validate()?;
    for item in items {
        item.validate()?;
    }

    let weights = items
        .iter()
        .map(LineItem::item_target_total)
        .collect::<Result<Vec<_>, _>>()?;
    let total_target_cost = money::sum(weights.iter().copied(), "total_target_cost")?;
    let total_actual_cost = totals.total_actual_cost()?;
    // Both operands are non-negative, the difference always fits.
    let aggregate_efficiency = total_target_cost - total_actual_cost;

    let zero_baseline = total_target_cost.is_zero();
    let (sellers, shipping, tax) = if zero_baseline {
        let zeros = vec![Money::ZERO; items.len()];
        (zeros.clone(), zeros.clone(), zeros)
    } else {
        (
            prorate(totals.sellers_price, &weights, total_target_cost)?,
            prorate(totals.shipping_price, &weights, total_target_cost)?,
            prorate(totals.tax, &weights, total_target_cost)?,
        )
    };

    let mut allocations = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let item_target_total = weights[idx];
        let shares = [sellers[idx], shipping[idx], tax[idx]];
        let allocated_actual_cost = money::sum(shares, "allocated_actual_cost")?;
        let item_efficiency = item_target_total - allocated_actual_cost;
        allocations.push(ItemAllocation {
            item_id: item.id,
            item_target_total,
            ratio: if zero_baseline {
                Decimal::ZERO
            } else {
                item_target_total / total_target_cost
            },
            seller_share: sellers[idx],
            shipping_share: shipping[idx],
            tax_share: tax[idx],
            allocated_actual_cost,
            item_efficiency,
            efficiency_percentage: money::percentage(item_efficiency, item_target_total)?,
        });
    }

    debug!(
        items = items.len(),
        %total_target_cost,
        %total_actual_cost,
        zero_baseline,
        "recomputed cost allocation"
    );

    Ok(AllocationResult {
        items: allocations,
        total_target_cost,
        total_actual_cost,
        aggregate_efficiency,
        efficiency_percentage: money::percentage(aggregate_efficiency, total_target_cost)?,
    })
}

/// Splits `amount` over `weights`, cent-rounded, with shares summing exactly to `amount`.
///
/// `total_weight` must be the positive sum of `weights`.
fn prorate(amount: Money, weights: &[Money], total_weight: Money) -> Result<Vec<Money>, InvalidInput> {
    let mut shares = weights
        .iter()
        .map(|&weight| exact_share(amount, weight, total_weight).map(money::round_cents))
        .collect::<Result<Vec<_>, _>>()?;

    let weighted: Vec<usize> = (0..weights.len())
        .rev()
        .filter(|&idx| weights[idx] > Money::ZERO)
        .collect();

    let mut residual = amount - money::sum(shares.iter().copied(), "prorated_total")?;
    for &idx in &weighted {
        if residual.abs() < CENT {
            break;
        }
        let step = if residual > Money::ZERO { CENT } else { -CENT };
        if shares[idx] + step >= Money::ZERO {
            shares[idx] += step;
            residual -= step;
        }
    }

    // Sub-cent leftovers only occur when `amount` itself has more than two decimals.
    if let Some(&last) = weighted.first() {
        shares[last] += residual;
    }
    Ok(shares)
}

/// `amount * weight / total_weight` before rounding.
///
/// Multiplies first to keep the quotient exact. When that product overflows, the ratio is
/// taken first; it is at most 1, so the share never exceeds `amount`.
fn exact_share(amount: Money, weight: Money, total_weight: Money) -> Result<Money, InvalidInput> {
    amount
        .checked_mul(weight)
        .and_then(|product| product.checked_div(total_weight))
        .or_else(|| {
            weight
                .checked_div(total_weight)
                .and_then(|ratio| amount.checked_mul(ratio))
        })
        .ok_or(InvalidInput::AmountOutOfRange { field: "prorated_share" })
}
