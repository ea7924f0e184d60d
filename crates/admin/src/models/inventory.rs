//! Inventory rows and the low-stock rule.

use chrono::NaiveDate;
use larder_core::ProductId;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Stock level for one product.
///
/// Whether the item is low on stock is derived from the two counters on every
/// read; it is never stored. Serialized output still carries it as
/// `is_low_stock` so dashboards can render it directly, and it is ignored on
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventoryItem {
    /// Product this row tracks.
    pub product_id: ProductId,
    /// Product display name.
    pub product_name: String,
    /// Units on hand.
    pub current_stock: u32,
    /// Alert when stock falls below this many units.
    pub low_stock_threshold: u32,
    /// Date of the last restock delivery.
    pub last_restocked: NaiveDate,
}

impl InventoryItem {
    #[must_use]
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        current_stock: u32,
        low_stock_threshold: u32,
        last_restocked: NaiveDate,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            current_stock,
            low_stock_threshold,
            last_restocked,
        }
    }

    /// Strictly below the threshold; a threshold of zero never alerts.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.current_stock < self.low_stock_threshold
    }
}

impl Serialize for InventoryItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("InventoryItem", 6)?;
        row.serialize_field("product_id", &self.product_id)?;
        row.serialize_field("product_name", &self.product_name)?;
        row.serialize_field("current_stock", &self.current_stock)?;
        row.serialize_field("low_stock_threshold", &self.low_stock_threshold)?;
        row.serialize_field("is_low_stock", &self.is_low_stock())?;
        row.serialize_field("last_restocked", &self.last_restocked)?;
        row.end()
    }
}
