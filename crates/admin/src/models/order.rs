//! Orders and the status audit log.

use chrono::{DateTime, Utc};
use larder_core::{Email, OrderId, OrderStatus, Price};
use serde::{Deserialize, Serialize};

/// An order as listed in the admin orders table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub email: Email,
    pub total: Price,
    pub status: OrderStatus,
    /// Number of units across all lines.
    pub item_count: u32,
    pub placed_at: DateTime<Utc>,
}

/// One entry in the order status audit log.
///
/// Entries are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    /// Order the update applies to.
    pub order_id: OrderId,
    /// Status the order moved to.
    pub status: OrderStatus,
    /// Carrier tracking number, usually set when shipped.
    pub tracking_number: Option<String>,
    /// Free-form operator notes.
    pub notes: Option<String>,
    /// When the update was recorded.
    pub updated_at: DateTime<Utc>,
}

impl OrderStatusUpdate {
    /// An update stamped with the current time.
    #[must_use]
    pub fn new(order_id: impl Into<OrderId>, status: OrderStatus) -> Self {
        Self {
            order_id: order_id.into(),
            status,
            tracking_number: None,
            notes: None,
            updated_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_tracking_number(mut self, tracking_number: impl Into<String>) -> Self {
        self.tracking_number = Some(tracking_number.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
