use colored::*;
use sourcing_common::config::Config;
use sourcing_common::models::product::Product;

use crate::commands::build_service;
use crate::terminal::{format, print};

pub async fn search(query: &str, cfg: &Config) -> anyhow::Result<()> {
    let service = build_service(cfg).await?;
    let products: Vec<Product> = service.search_products(query).await?;

    if products.is_empty() {
        print::no_results();
        return Ok(());
    }

    for (idx, product) in products.iter().enumerate() {
        print::tree_head(idx, &product.product_name);
        if cfg.quiet < 2 {
            print_product(product);
        }
    }

    if cfg.quiet == 0 {
        print::fat_separator();
    }
    print::print_status(format!("{} products matched", products.len().to_string().bold()));
    Ok(())
}

fn print_product(product: &Product) {
    let mut details: Vec<(String, ColoredString)> = vec![
        ("Id".into(), product.id.to_string().normal()),
        ("SKU".into(), product.sku.as_str().normal()),
        ("Target".into(), format::money(product.target_cost_per_unit).normal()),
    ];
    if !product.category.is_empty() {
        details.push(("Category".into(), product.category.as_str().normal()));
    }
    if !product.product_type.is_empty() {
        details.push(("Type".into(), product.product_type.as_str().normal()));
    }
    print::as_tree_one_level(details);
}
