//! Admin dashboard store.
//!
//! The dashboard state is a bag of independent slices, each with its own
//! setter. Slices never update each other, with one exception: replacing the
//! inventory recomputes the low-stock alert list. The alert list can then be
//! trimmed on its own (an operator acknowledging an alert) without touching
//! inventory.
//!
//! The order status log is append-only. Updates are prepended and never
//! validated against [`OrderStatus::can_transition_to`]; that check is a hint
//! for the UI.

use larder_core::{CampaignId, OrderId, OrderStatus, ProductId, Store};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::{
    AdminStats, Campaign, CampaignPatch, InventoryItem, NotificationSettings, OrderStatusUpdate,
    SalesPoint,
};

/// Snapshot of every dashboard slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminState {
    pub stats: AdminStats,
    pub sales_data: Vec<SalesPoint>,
    pub inventory: Vec<InventoryItem>,
    /// Items flagged low when the inventory was last replaced, minus any the
    /// operator dismissed since.
    pub low_stock_alerts: Vec<InventoryItem>,
    /// Newest first.
    pub order_updates: Vec<OrderStatusUpdate>,
    pub notification_settings: NotificationSettings,
    pub active_campaigns: Vec<Campaign>,
}

/// Observable admin dashboard state.
#[derive(Debug, Default)]
pub struct AdminStore {
    state: Store<AdminState>,
}

impl AdminStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the whole dashboard state.
    #[must_use]
    pub fn snapshot(&self) -> AdminState {
        self.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AdminState> {
        self.state.subscribe()
    }

    // =========================================================================
    // Stats and sales
    // =========================================================================

    pub fn update_stats(&self, stats: AdminStats) {
        self.state.update(|state| {
            state.stats = stats;
            true
        });
    }

    #[must_use]
    pub fn stats(&self) -> AdminStats {
        self.state.read(|state| state.stats.clone())
    }

    pub fn update_sales_data(&self, series: Vec<SalesPoint>) {
        debug!(points = series.len(), "sales data replaced");
        self.state.update(|state| {
            state.sales_data = series;
            true
        });
    }

    #[must_use]
    pub fn sales_data(&self) -> Vec<SalesPoint> {
        self.state.read(|state| state.sales_data.clone())
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Replace the inventory and rebuild the low-stock alert list from it.
    pub fn update_inventory(&self, inventory: Vec<InventoryItem>) {
        let alerts: Vec<InventoryItem> = inventory
            .iter()
            .filter(|item| item.is_low_stock())
            .cloned()
            .collect();
        if !alerts.is_empty() {
            warn!(count = alerts.len(), "items below low-stock threshold");
        }
        self.state.update(|state| {
            state.inventory = inventory;
            state.low_stock_alerts = alerts;
            true
        });
    }

    #[must_use]
    pub fn inventory(&self) -> Vec<InventoryItem> {
        self.state.read(|state| state.inventory.clone())
    }

    #[must_use]
    pub fn low_stock_alerts(&self) -> Vec<InventoryItem> {
        self.state.read(|state| state.low_stock_alerts.clone())
    }

    /// Dismiss the alert for `product_id`. Inventory is left as it is.
    ///
    /// Returns whether an alert was removed.
    pub fn remove_low_stock_alert(&self, product_id: &ProductId) -> bool {
        self.state.update(|state| {
            let before = state.low_stock_alerts.len();
            state
                .low_stock_alerts
                .retain(|item| &item.product_id != product_id);
            state.low_stock_alerts.len() != before
        })
    }

    // =========================================================================
    // Order status log
    // =========================================================================

    /// Record a status change at the front of the log.
    pub fn update_order_status(&self, update: OrderStatusUpdate) {
        info!(order_id = %update.order_id, status = %update.status, "order status recorded");
        self.state.update(|state| {
            state.order_updates.insert(0, update);
            true
        });
    }

    #[must_use]
    pub fn order_updates(&self) -> Vec<OrderStatusUpdate> {
        self.state.read(|state| state.order_updates.clone())
    }

    /// Log entries for one order, newest first.
    #[must_use]
    pub fn order_history(&self, order_id: &OrderId) -> Vec<OrderStatusUpdate> {
        self.state.read(|state| {
            state
                .order_updates
                .iter()
                .filter(|update| &update.order_id == order_id)
                .cloned()
                .collect()
        })
    }

    /// Most recently recorded status for an order.
    #[must_use]
    pub fn latest_status(&self, order_id: &OrderId) -> Option<OrderStatus> {
        self.state.read(|state| {
            state
                .order_updates
                .iter()
                .find(|update| &update.order_id == order_id)
                .map(|update| update.status)
        })
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn update_notification_settings(&self, settings: NotificationSettings) {
        self.state.update(|state| {
            let changed = state.notification_settings != settings;
            state.notification_settings = settings;
            changed
        });
    }

    #[must_use]
    pub fn notification_settings(&self) -> NotificationSettings {
        self.state.read(|state| state.notification_settings)
    }

    // =========================================================================
    // Campaigns
    // =========================================================================

    pub fn add_campaign(&self, campaign: Campaign) {
        debug!(campaign_id = %campaign.id, "campaign added");
        self.state.update(|state| {
            state.active_campaigns.push(campaign);
            true
        });
    }

    /// Merge `patch` into the campaign with `id`.
    ///
    /// Returns `false`, leaving the list untouched, when no campaign has that id.
    pub fn update_campaign(&self, id: &CampaignId, patch: CampaignPatch) -> bool {
        self.state.update(|state| {
            match state.active_campaigns.iter_mut().find(|c| &c.id == id) {
                Some(campaign) => {
                    patch.apply_to(campaign);
                    true
                }
                None => false,
            }
        })
    }

    #[must_use]
    pub fn campaigns(&self) -> Vec<Campaign> {
        self.state.read(|state| state.active_campaigns.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::{CampaignStatus, CampaignType};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
    }

    fn campaign(id: &str) -> Campaign {
        Campaign {
            id: CampaignId::new(id),
            name: format!("Campaign {id}"),
            kind: CampaignType::Social,
            status: CampaignStatus::Scheduled,
            budget: Decimal::new(250, 0),
            start_date: day(),
            end_date: None,
            reach: 0,
            conversions: 0,
        }
    }

    #[test]
    fn test_update_inventory_recomputes_alerts() {
        let store = AdminStore::new();
        store.update_inventory(vec![
            InventoryItem::new("P1", "Rye Flour", 2, 5, day()),
            InventoryItem::new("P2", "Honey", 40, 5, day()),
        ]);

        let alerts = store.low_stock_alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts.first().unwrap().product_id.as_str(), "P1");

        store.update_inventory(vec![InventoryItem::new("P1", "Rye Flour", 20, 5, day())]);
        assert!(store.low_stock_alerts().is_empty());
    }

    #[test]
    fn test_dismissing_alert_keeps_inventory() {
        let store = AdminStore::new();
        store.update_inventory(vec![InventoryItem::new("P1", "Rye Flour", 2, 5, day())]);

        assert!(store.remove_low_stock_alert(&ProductId::new("P1")));
        assert!(store.low_stock_alerts().is_empty());

        let inventory = store.inventory();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.first().unwrap().current_stock, 2);
        assert!(inventory.first().unwrap().is_low_stock());

        assert!(!store.remove_low_stock_alert(&ProductId::new("P1")));
    }

    #[test]
    fn test_order_updates_prepend_without_validation() {
        let store = AdminStore::new();
        store.update_order_status(OrderStatusUpdate::new("O-1", OrderStatus::Delivered));
        store.update_order_status(OrderStatusUpdate::new("O-2", OrderStatus::Pending));
        store.update_order_status(
            OrderStatusUpdate::new("O-1", OrderStatus::Pending).with_notes("reopened"),
        );

        let log = store.order_updates();
        assert_eq!(log.len(), 3);
        assert_eq!(log.first().unwrap().notes.as_deref(), Some("reopened"));

        let history = store.order_history(&OrderId::new("O-1"));
        let statuses: Vec<_> = history.iter().map(|u| u.status).collect();
        assert_eq!(statuses, vec![OrderStatus::Pending, OrderStatus::Delivered]);
        assert_eq!(
            store.latest_status(&OrderId::new("O-1")),
            Some(OrderStatus::Pending)
        );
        assert_eq!(store.latest_status(&OrderId::new("O-9")), None);
    }

    #[test]
    fn test_campaign_update_by_id() {
        let store = AdminStore::new();
        store.add_campaign(campaign("C1"));
        store.add_campaign(campaign("C2"));

        let patch = CampaignPatch {
            status: Some(CampaignStatus::Active),
            ..CampaignPatch::default()
        };
        assert!(store.update_campaign(&CampaignId::new("C2"), patch.clone()));
        assert!(!store.update_campaign(&CampaignId::new("C9"), patch));

        let campaigns = store.campaigns();
        assert_eq!(campaigns.first().unwrap().status, CampaignStatus::Scheduled);
        assert_eq!(campaigns.get(1).unwrap().status, CampaignStatus::Active);
    }

    #[test]
    fn test_slices_replace_wholesale() {
        let store = AdminStore::new();
        store.update_stats(AdminStats {
            total_orders: 12,
            ..AdminStats::default()
        });
        store.update_stats(AdminStats {
            total_customers: 3,
            ..AdminStats::default()
        });
        let stats = store.stats();
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_customers, 3);

        let settings = NotificationSettings {
            marketing_emails: true,
            ..NotificationSettings::default()
        };
        store.update_notification_settings(settings);
        assert_eq!(store.notification_settings(), settings);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = AdminStore::new();
        let mut rx = store.subscribe();
        store.add_campaign(campaign("C1"));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().active_campaigns.len(), 1);
    }
}
