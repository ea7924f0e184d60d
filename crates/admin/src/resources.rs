//! Orders and customers resources.
//!
//! Both expose the same loading/error/data triple over [`AdminApi`] and share
//! one fetch routine. A failed fetch records the error, raises an error
//! notification, and hands the error back to the caller.

use std::future::Future;
use std::sync::Arc;

use larder_core::{ApiResult, FetchTicket, Notification, Notifier, ResourceState, Store};
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::api::AdminApi;
use crate::error::{AppError, Result};
use crate::models::{Customer, Order};

/// Observable list shared by the admin resources.
struct ListResource<T> {
    label: &'static str,
    state: Store<ResourceState<T>>,
    tickets: FetchTicket,
    notifier: Arc<dyn Notifier>,
}

impl<T: Clone> ListResource<T> {
    fn new(label: &'static str, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            label,
            state: Store::default(),
            tickets: FetchTicket::new(),
            notifier,
        }
    }

    async fn fetch(&self, request: impl Future<Output = ApiResult<Vec<T>>>) -> Result<Vec<T>> {
        let ticket = self.tickets.issue();
        self.state.update(|state| {
            state.begin();
            true
        });

        match request.await {
            Ok(response) => {
                let rows = response.data;
                if self.tickets.is_current(ticket) {
                    let data = rows.clone();
                    self.state.update(|state| {
                        state.data = data;
                        state.succeed();
                        true
                    });
                    debug!(resource = self.label, count = rows.len(), "loaded");
                } else {
                    debug!(resource = self.label, ticket, "discarding stale response");
                }
                Ok(rows)
            }
            Err(e) => {
                let err = AppError::from(e);
                if self.tickets.is_current(ticket) {
                    let message = format!("Failed to load {}: {}", self.label, err.user_message());
                    err.report(self.label);
                    self.state.update(|state| {
                        state.fail(message.clone());
                        true
                    });
                    self.notifier.notify(Notification::error(message));
                }
                Err(err)
            }
        }
    }
}

/// Orders table state.
pub struct OrdersResource<A> {
    api: Arc<A>,
    list: ListResource<Order>,
}

impl<A: AdminApi> OrdersResource<A> {
    #[must_use]
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            list: ListResource::new("orders", notifier),
        }
    }

    #[must_use]
    pub fn state(&self) -> ResourceState<Order> {
        self.list.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Order>> {
        self.list.state.subscribe()
    }

    /// Load every order. Only the latest of overlapping fetches updates state.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording it in state.
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<Vec<Order>> {
        self.list.fetch(self.api.get_orders()).await
    }
}

/// Customers table state.
pub struct CustomersResource<A> {
    api: Arc<A>,
    list: ListResource<Customer>,
}

impl<A: AdminApi> CustomersResource<A> {
    #[must_use]
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            list: ListResource::new("customers", notifier),
        }
    }

    #[must_use]
    pub fn state(&self) -> ResourceState<Customer> {
        self.list.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<Customer>> {
        self.list.state.subscribe()
    }

    /// Load every customer.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording it in state.
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<Vec<Customer>> {
        self.list.fetch(self.api.get_customers()).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use larder_core::{
        ApiError, ApiResponse, Email, MemoryNotifier, NotificationLevel, OrderId, OrderStatus, Price,
    };

    use super::*;
    use crate::api::MockAdminApi;

    fn order(id: &str) -> Order {
        Order {
            id: OrderId::new(id),
            customer_name: "Ada Baker".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            total: Price::usd_cents(4_250),
            status: OrderStatus::Processing,
            item_count: 2,
            placed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_fetch_orders() {
        let api = Arc::new(MockAdminApi::new(
            Duration::ZERO,
            vec![order("O-1"), order("O-2")],
            Vec::new(),
        ));
        let orders = OrdersResource::new(api, Arc::new(MemoryNotifier::new()));

        orders.fetch().await.unwrap();
        let state = orders.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.data.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_rows() {
        let api = Arc::new(MockAdminApi::new(Duration::ZERO, vec![order("O-1")], Vec::new()));
        let notifier = Arc::new(MemoryNotifier::new());
        let orders = OrdersResource::new(api.clone(), notifier.clone());
        orders.fetch().await.unwrap();

        api.fail_next();
        let err = orders.fetch().await.unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::Unavailable(_))));

        let state = orders.state();
        assert_eq!(state.data.len(), 1);
        assert!(state.error.unwrap().starts_with("Failed to load orders"));
        assert_eq!(
            notifier.drain().first().map(|n| n.level),
            Some(NotificationLevel::Error)
        );
    }

    #[tokio::test]
    async fn test_refetch_picks_up_backend_changes() {
        let api = Arc::new(MockAdminApi::new(Duration::ZERO, vec![order("O-1")], Vec::new()));
        let orders = OrdersResource::new(api.clone(), Arc::new(MemoryNotifier::new()));
        orders.fetch().await.unwrap();
        assert_eq!(orders.state().data.len(), 1);

        api.set_orders(vec![order("O-1"), order("O-2"), order("O-3")])
            .unwrap();
        assert_eq!(orders.state().data.len(), 1);

        orders.fetch().await.unwrap();
        let ids: Vec<_> = orders.state().data.iter().map(|o| o.id.to_string()).collect();
        assert_eq!(ids, vec!["O-1", "O-2", "O-3"]);
    }

    #[tokio::test]
    async fn test_customers_start_empty() {
        let customers =
            CustomersResource::new(Arc::new(MockAdminApi::default()), Arc::new(MemoryNotifier::new()));
        assert!(customers.state().data.is_empty());
        assert!(customers.fetch().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_response_discarded() {
        let list: ListResource<u32> = ListResource::new("numbers", Arc::new(MemoryNotifier::new()));
        let slow = async {
            tokio::time::sleep(Duration::from_millis(40)).await;
            Ok::<_, ApiError>(ApiResponse::new(vec![1]))
        };
        let fast = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok::<_, ApiError>(ApiResponse::new(vec![2]))
        };

        let second = async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            list.fetch(fast).await
        };
        let (first, second) = tokio::join!(list.fetch(slow), second);
        assert_eq!(first.unwrap(), vec![1]);
        assert_eq!(second.unwrap(), vec![2]);
        assert_eq!(list.state.snapshot().data, vec![2]);
    }
}
