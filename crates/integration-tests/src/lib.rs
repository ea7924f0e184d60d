//! Integration tests for Larder.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p larder-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart, catalog, and checkout through `AppState`
//! - `admin_dashboard` - Admin store, resources, and pagination
//!
//! Shared fixtures live here so both suites build state the same way.

use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use larder_admin::models::InventoryItem;
use larder_core::{Price, ProductId};
use larder_storefront::StorefrontConfig;
use larder_storefront::catalog::Product;

/// Storefront config with no simulated latency.
#[must_use]
pub fn storefront_config() -> StorefrontConfig {
    StorefrontConfig {
        api_latency: Duration::ZERO,
        ..StorefrontConfig::default()
    }
}

/// A product with the given id, name, and price in cents.
#[must_use]
pub fn product(id: &str, name: &str, cents: u32, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: format!("{name} from the larder"),
        price: Price::usd_cents(cents),
        category: "Pantry".to_string(),
        image: format!("/images/{id}.jpg"),
        stock,
        rating: 4.0,
        created_at: Utc
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default(),
    }
}

/// A small catalog of pantry staples.
#[must_use]
pub fn pantry() -> Vec<Product> {
    vec![
        product("P1", "Stone-ground Flour", 699, 12),
        product("P2", "Wildflower Honey", 1_450, 3),
        product("P3", "Smoked Sea Salt", 525, 0),
    ]
}

/// An inventory row restocked on 1 March 2026.
#[must_use]
pub fn inventory_item(id: &str, stock: u32, threshold: u32) -> InventoryItem {
    let restocked = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap_or_default();
    InventoryItem::new(id, format!("Item {id}"), stock, threshold, restocked)
}

/// JSON fixtures for the mock admin API: 23 orders and 2 customers.
#[must_use]
pub fn admin_fixtures() -> String {
    let orders: Vec<serde_json::Value> = (1..=23)
        .map(|n| {
            serde_json::json!({
                "id": format!("ORD-{n:04}"),
                "customer_name": if n % 2 == 0 { "Ada Baker" } else { "Grace Miller" },
                "email": if n % 2 == 0 { "ada@example.com" } else { "grace@example.com" },
                "total": { "amount": format!("{}.00", 10 + n), "currency_code": "USD" },
                "status": "processing",
                "item_count": n % 4 + 1,
                "placed_at": format!("2026-02-{n:02}T09:00:00Z"),
            })
        })
        .collect();

    serde_json::json!({
        "orders": orders,
        "customers": [
            {
                "id": "CUS-1",
                "name": "Ada Baker",
                "email": "ada@example.com",
                "order_count": 11,
                "total_spent": { "amount": "253.00", "currency_code": "USD" },
                "joined_at": "2025-11-02T08:00:00Z"
            },
            {
                "id": "CUS-2",
                "name": "Grace Miller",
                "email": "grace@example.com",
                "order_count": 12,
                "total_spent": { "amount": "264.00", "currency_code": "USD" },
                "joined_at": "2025-12-14T08:00:00Z"
            }
        ]
    })
    .to_string()
}
