//! Dashboard aggregates.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline numbers for the dashboard, replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    /// Revenue across all orders.
    pub total_revenue: Decimal,
    /// Number of orders placed.
    pub total_orders: u64,
    /// Number of registered customers.
    pub total_customers: u64,
    /// Number of products in the catalog.
    pub total_products: u64,
    /// Mean order value.
    pub average_order_value: Decimal,
    /// Share of visitors who placed an order, as a percentage.
    pub conversion_rate: Decimal,
}

/// One day of the sales chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesPoint {
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub orders: u32,
    pub visitors: u32,
}
