#![cfg(test)]
use rust_decimal_macros::dec;
use sourcing_common::models::order::OrderRecord;
use sourcing_core::report::{GroupSavings, SavingsReport, UNSPECIFIED};

const ORDERS: &str = r#"[
    {
        "id": 1, "sourcer": "ana@example.com", "purchaser": "pat@example.com",
        "status": "Purchased", "market": "eBay",
        "totals": { "sellers_price": "30", "shipping_price": "6", "tax": "4" },
        "items": [
            { "id": 1, "product_name": "Nintendo 64 Console", "quantity_needed": 2, "target_cost_per_unit": "25", "category": "Consoles" },
            { "id": 2, "product_name": "Mario Kart 64", "quantity_needed": 2, "target_cost_per_unit": "5", "category": "Games" }
        ]
    },
    {
        "id": 2, "sourcer": "ana@example.com",
        "status": "Seller Rejected", "market": "Mercari",
        "totals": { "sellers_price": "1" },
        "items": [ { "id": 2, "product_name": "Mario Kart 64", "target_cost_per_unit": "5" } ]
    },
    {
        "id": 3, "sourcer": "ben@example.com", "purchaser": "pat@example.com",
        "status": "Dropshipped",
        "totals": { "sellers_price": "12", "shipping_price": "3" },
        "items": [ { "id": 3, "product_name": "Rumble Pak", "target_cost_per_unit": "10", "category": "Accessories" } ]
    }
]"#;

fn orders() -> Vec<OrderRecord> {
    serde_json::from_str(ORDERS).unwrap()
}

#[test]
fn report_over_exported_orders() {
    let report = SavingsReport::build(&orders()).unwrap();

    assert_eq!(report.realized_orders, 2);
    assert_eq!(report.total_target_cost, dec!(70));
    assert_eq!(report.total_savings, dec!(15));
    assert_eq!(report.efficiency_percentage, dec!(21.43));

    assert_eq!(
        report.by_market,
        vec![
            GroupSavings { key: UNSPECIFIED.into(), total_savings: dec!(-5) },
            GroupSavings { key: "eBay".into(), total_savings: dec!(20) },
        ]
    );
    assert_eq!(report.orders_per_sourcer[0].count, 2);
    assert_eq!(report.orders_per_purchaser[0].count, 2);
}

#[test]
fn category_savings_add_up_to_total() {
    let report = SavingsReport::build(&orders()).unwrap();

    let by_category: rust_decimal::Decimal = report.by_category.iter().map(|group| group.total_savings).sum();
    assert_eq!(by_category, report.total_savings);
    assert_eq!(report.by_category[0].key, "Accessories");
}
