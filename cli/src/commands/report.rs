use std::path::Path;

use anyhow::Context;
use colored::*;
use sourcing_common::config::Config;
use sourcing_common::models::order::OrderRecord;
use sourcing_common::money::Money;
use sourcing_core::report::{GroupCount, GroupSavings, SavingsReport};

use crate::terminal::{format, print};

type Detail = (String, ColoredString);

pub async fn report(path: &Path, cfg: &Config) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read orders {}", path.display()))?;
    let orders: Vec<OrderRecord> =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse orders {}", path.display()))?;

    let report = SavingsReport::build(&orders)?;
    let Some(summary) = summary_lines(&report, orders.len()) else {
        print::no_results();
        return Ok(());
    };

    for (key, value) in summary {
        print::aligned_line(key, value);
    }

    if cfg.quiet < 2 {
        section("By sourcer", savings_details(&report.by_sourcer), cfg);
        section("By market", savings_details(&report.by_market), cfg);
        section("By category", savings_details(&report.by_category), cfg);
        section("Orders per sourcer", count_details(&report.orders_per_sourcer), cfg);
        section("Orders per purchaser", count_details(&report.orders_per_purchaser), cfg);
    }
    Ok(())
}

/// Headline figures, or `None` when no listed order was realized.
fn summary_lines(report: &SavingsReport, listed: usize) -> Option<Vec<(&'static str, ColoredString)>> {
    if report.realized_orders == 0 {
        return None;
    }
    Some(vec![
        ("Orders", format!("{} of {}", report.realized_orders, listed).normal()),
        ("Total target", format::money(report.total_target_cost).normal()),
        (
            "Total savings",
            format::efficiency(report.total_savings, report.efficiency_percentage),
        ),
    ])
}

fn section(title: &str, details: Vec<Detail>, cfg: &Config) {
    if details.is_empty() {
        return;
    }
    print::blank();
    print::header(title, cfg.quiet);
    print::as_tree_one_level(details);
}

fn savings_details(groups: &[GroupSavings]) -> Vec<Detail> {
    groups
        .iter()
        .map(|group| {
            let value = if group.total_savings < Money::ZERO {
                format::money(group.total_savings).red()
            } else {
                format::money(group.total_savings).green()
            };
            (group.key.clone(), value)
        })
        .collect()
}

fn count_details(groups: &[GroupCount]) -> Vec<Detail> {
    groups
        .iter()
        .map(|group| (group.key.clone(), group.count.to_string().normal()))
        .collect()
}
