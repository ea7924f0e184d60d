//! Application state shared across the admin dashboard.

use std::sync::Arc;

use chrono::NaiveDate;
use larder_core::{Notifier, OrderStatus, Pagination, TracingNotifier};
use rust_decimal::Decimal;

use crate::api::{AdminApi, MockAdminApi};
use crate::config::AdminConfig;
use crate::models::{AdminStats, Order};
use crate::resources::{CustomersResource, OrdersResource};
use crate::sales::generate_sales_series;
use crate::store::AdminStore;

/// Application state shared across all dashboard views.
///
/// This struct is cheaply cloneable via `Arc`.
pub struct AppState<A = MockAdminApi> {
    inner: Arc<AppStateInner<A>>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct AppStateInner<A> {
    config: AdminConfig,
    store: AdminStore,
    orders: OrdersResource<A>,
    customers: CustomersResource<A>,
}

impl AppState<MockAdminApi> {
    /// State backed by an empty mock API that logs notifications.
    #[must_use]
    pub fn with_mock_api(config: AdminConfig) -> Self {
        let api = Arc::new(MockAdminApi::new(config.api_latency, Vec::new(), Vec::new()));
        Self::new(config, api, Arc::new(TracingNotifier))
    }
}

impl<A: AdminApi> AppState<A> {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig, api: Arc<A>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: AdminStore::new(),
                orders: OrdersResource::new(Arc::clone(&api), Arc::clone(&notifier)),
                customers: CustomersResource::new(api, notifier),
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the dashboard store.
    #[must_use]
    pub fn store(&self) -> &AdminStore {
        &self.inner.store
    }

    #[must_use]
    pub fn orders(&self) -> &OrdersResource<A> {
        &self.inner.orders
    }

    #[must_use]
    pub fn customers(&self) -> &CustomersResource<A> {
        &self.inner.customers
    }

    /// Regenerate the sales chart for the configured window ending on `end_date`.
    pub fn refresh_sales_data(&self, end_date: NaiveDate) {
        let series = generate_sales_series(
            self.config().sales_series_days,
            end_date,
            &mut rand::rng(),
        );
        self.store().update_sales_data(series);
    }

    /// Recompute the headline stats from loaded orders, customers, inventory,
    /// and the sales chart, and store them.
    pub fn refresh_stats(&self) -> AdminStats {
        let orders = self.orders().state().data;
        let customers = self.customers().state().data.len();
        let snapshot = self.store().snapshot();

        let stats = summarize(
            &orders,
            customers,
            snapshot.inventory.len(),
            snapshot.sales_data.iter().map(|p| u64::from(p.visitors)).sum(),
        );
        self.store().update_stats(stats.clone());
        stats
    }

    /// One page of the loaded orders, newest first.
    #[must_use]
    pub fn orders_page(&self, page: usize) -> (Vec<Order>, Pagination) {
        let mut orders = self.orders().state().data;
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));

        let mut pagination = Pagination::new(orders.len(), self.config().items_per_page);
        pagination.go_to_page(page);
        let rows = pagination.paginate(&orders).to_vec();
        (rows, pagination)
    }
}

fn summarize(orders: &[Order], customers: usize, products: usize, visitors: u64) -> AdminStats {
    let billable: Vec<&Order> = orders
        .iter()
        .filter(|order| order.status != OrderStatus::Cancelled)
        .collect();
    let revenue: Decimal = billable.iter().map(|order| order.total.amount()).sum();
    let counted = billable.len();
    let average_order_value = if counted == 0 {
        Decimal::ZERO
    } else {
        (revenue / Decimal::from(counted)).round_dp(2)
    };
    let conversion_rate = if visitors == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(orders.len()) * Decimal::ONE_HUNDRED / Decimal::from(visitors)).round_dp(2)
    };

    AdminStats {
        total_revenue: revenue,
        total_orders: count(orders.len()),
        total_customers: count(customers),
        total_products: count(products),
        average_order_value,
        conversion_rate,
    }
}

fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use larder_core::{Email, MemoryNotifier, OrderId, Price};

    use super::*;

    fn config() -> AdminConfig {
        AdminConfig {
            api_latency: Duration::ZERO,
            items_per_page: 2,
            sales_series_days: 7,
            sentry_dsn: None,
        }
    }

    fn order(n: u32, cents: u32, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(format!("O-{n}")),
            customer_name: "Ada Baker".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            total: Price::usd_cents(cents),
            status,
            item_count: 1,
            placed_at: Utc.with_ymd_and_hms(2026, 3, n, 12, 0, 0).unwrap(),
        }
    }

    fn state_with(orders: Vec<Order>) -> AppState {
        let api = Arc::new(MockAdminApi::new(Duration::ZERO, orders, Vec::new()));
        AppState::new(config(), api, Arc::new(MemoryNotifier::new()))
    }

    #[tokio::test]
    async fn test_orders_page_newest_first() {
        let state = state_with((1..=5).map(|n| order(n, 1_000, OrderStatus::Pending)).collect());
        state.orders().fetch().await.unwrap();

        let (rows, pagination) = state.orders_page(1);
        assert_eq!(pagination.total_pages(), 3);
        let ids: Vec<_> = rows.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["O-5", "O-4"]);

        let (rows, pagination) = state.orders_page(99);
        assert_eq!(pagination.current_page(), 3);
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_stats_skips_cancelled_revenue() {
        let state = state_with(vec![
            order(1, 2_000, OrderStatus::Delivered),
            order(2, 3_000, OrderStatus::Shipped),
            order(3, 9_900, OrderStatus::Cancelled),
        ]);
        state.orders().fetch().await.unwrap();

        let stats = state.refresh_stats();
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.total_revenue, Decimal::new(50, 0));
        assert_eq!(stats.average_order_value, Decimal::new(25, 0));
        assert_eq!(stats.conversion_rate, Decimal::ZERO);
        assert_eq!(state.store().stats(), stats);
    }

    #[test]
    fn test_refresh_sales_data_uses_configured_window() {
        let state = AppState::with_mock_api(config());
        let end = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        state.refresh_sales_data(end);

        let series = state.store().sales_data();
        assert_eq!(series.len(), 7);
        assert_eq!(series.last().unwrap().date, end);
    }
}
