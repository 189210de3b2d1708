use std::path::Path;

use colored::*;
use sourcing_common::config::Config;
use sourcing_common::models::item::LineItem;
use sourcing_core::allocation::{AllocationResult, ItemAllocation};
use sourcing_core::cart::CartState;

use crate::commands::build_service;
use crate::draft::Draft;
use crate::terminal::{format, print};

type Detail = (String, ColoredString);

const NOT_PRORATED: &str = "No target cost in cart, nothing was prorated";

pub async fn allocate(path: &Path, cfg: &Config) -> anyhow::Result<()> {
    let service = build_service(cfg).await?;
    let cart = Draft::load(path).await?.into_cart(&service).await?;

    print_allocation(&cart, cfg);
    Ok(())
}

pub fn print_allocation(cart: &CartState, cfg: &Config) {
    if cart.is_empty() {
        print::no_results();
        return;
    }

    if cfg.quiet < 2 {
        let allocation = cart.allocation();
        for (idx, (item, alloc)) in cart.items().iter().zip(&allocation.items).enumerate() {
            print::tree_head(idx, &item_title(item));
            print::as_tree_one_level(item_details(item, alloc));
        }
        print::blank();
    }

    if cfg.quiet == 0 {
        print::fat_separator();
    }
    for (key, value) in summary_lines(cart.allocation()) {
        print::aligned_line(key, value);
    }
    if let Some(notice) = proration_notice(cart.allocation()) {
        print::print_status(notice.yellow());
    }
}

fn item_title(item: &LineItem) -> String {
    if item.sku.is_empty() {
        item.product_name.clone()
    } else {
        format!("{} ({})", item.product_name, item.sku)
    }
}

fn item_details(item: &LineItem, alloc: &ItemAllocation) -> Vec<Detail> {
    vec![
        ("Quantity".into(), item.quantity_needed.to_string().normal()),
        ("Target".into(), format::money(alloc.item_target_total).normal()),
        ("Ratio".into(), format::ratio(alloc.ratio).normal()),
        ("Seller".into(), format::money(alloc.seller_share).normal()),
        ("Shipping".into(), format::money(alloc.shipping_share).normal()),
        ("Tax".into(), format::money(alloc.tax_share).normal()),
        ("Actual".into(), format::money(alloc.allocated_actual_cost).bold()),
        (
            "Savings".into(),
            format::efficiency(alloc.item_efficiency, alloc.efficiency_percentage),
        ),
    ]
}

fn summary_lines(allocation: &AllocationResult) -> Vec<(&'static str, ColoredString)> {
    vec![
        ("Total target", format::money(allocation.total_target_cost).normal()),
        ("Total actual", format::money(allocation.total_actual_cost).normal()),
        (
            "Efficiency",
            format::efficiency(allocation.aggregate_efficiency, allocation.efficiency_percentage),
        ),
    ]
}

fn proration_notice(allocation: &AllocationResult) -> Option<&'static str> {
    (!allocation.is_prorated()).then_some(NOT_PRORATED)
}
