//! Domain models for the admin dashboard.

mod campaign;
mod customer;
mod inventory;
mod order;
mod settings;
mod stats;

pub use campaign::{Campaign, CampaignPatch, CampaignStatus, CampaignType};
pub use customer::Customer;
pub use inventory::InventoryItem;
pub use order::{Order, OrderStatusUpdate};
pub use settings::NotificationSettings;
pub use stats::{AdminStats, SalesPoint};
