use chrono::{DateTime, Utc};
use larder_core::{CustomerId, Email, Price};
use serde::{Deserialize, Serialize};

/// A customer as listed in the admin customers table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    /// Orders placed to date.
    pub order_count: u32,
    /// Lifetime spend.
    pub total_spent: Price,
    pub joined_at: DateTime<Utc>,
}
