use rust_decimal_macros::dec;
use sourcing_common::models::product::Product;
use sourcing_core::catalog::JsonCatalog;

pub fn products() -> Vec<Product> {
    vec![
        Product::new(1, "Nintendo 64 Console", dec!(10))
            .with_sku("N64-GRY")
            .with_category("Consoles")
            .with_product_type("Console"),
        Product::new(2, "Mario Kart 64", dec!(5))
            .with_sku("N64-MK")
            .with_category("Games")
            .with_product_type("Game"),
        Product::new(3, "Rumble Pak", dec!(0))
            .with_sku("N64-RMB")
            .with_category("Accessories")
            .with_product_type("Accessory"),
    ]
}

pub fn catalog() -> JsonCatalog {
    JsonCatalog::from_products(products())
}
