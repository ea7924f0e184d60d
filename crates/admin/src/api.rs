//! Orders and customers API.
//!
//! [`AdminApi`] is the in-process contract the dashboard resources talk to.
//! [`MockAdminApi`] serves it from memory, loaded from JSON fixtures.

use std::future::Future;
use std::sync::RwLock;
use std::time::Duration;

use larder_core::{ApiError, ApiResponse, ApiResult, MockBehavior};
use serde::Deserialize;
use tracing::instrument;

use crate::models::{Customer, Order};

/// Read access to orders and customers.
pub trait AdminApi: Send + Sync {
    fn get_orders(&self) -> impl Future<Output = ApiResult<Vec<Order>>> + Send;

    fn get_customers(&self) -> impl Future<Output = ApiResult<Vec<Customer>>> + Send;
}

/// Fixture file shape: `{ "orders": [...], "customers": [...] }`.
#[derive(Debug, Default, Deserialize)]
struct Fixtures {
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(default)]
    customers: Vec<Customer>,
}

/// Admin API served from memory, with simulated latency.
#[derive(Debug, Default)]
pub struct MockAdminApi {
    orders: RwLock<Vec<Order>>,
    customers: RwLock<Vec<Customer>>,
    behavior: MockBehavior,
}

impl MockAdminApi {
    #[must_use]
    pub fn new(latency: Duration, orders: Vec<Order>, customers: Vec<Customer>) -> Self {
        Self {
            orders: RwLock::new(orders),
            customers: RwLock::new(customers),
            behavior: MockBehavior::new(latency),
        }
    }

    /// Load fixtures from a JSON object with `orders` and `customers` arrays.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `json` does not match the fixture shape.
    pub fn from_json(latency: Duration, json: &str) -> Result<Self, serde_json::Error> {
        let fixtures: Fixtures = serde_json::from_str(json)?;
        Ok(Self::new(latency, fixtures.orders, fixtures.customers))
    }

    /// Make the next call fail.
    pub fn fail_next(&self) {
        self.behavior.fail_next();
    }

    /// Replace the stored orders, as if the backend changed underneath.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unavailable`] if the lock is poisoned.
    pub fn set_orders(&self, orders: Vec<Order>) -> Result<(), ApiError> {
        *self
            .orders
            .write()
            .map_err(|_| ApiError::Unavailable("orders lock poisoned".to_string()))? = orders;
        Ok(())
    }
}

impl AdminApi for MockAdminApi {
    #[instrument(skip(self))]
    async fn get_orders(&self) -> ApiResult<Vec<Order>> {
        self.behavior.simulate("getOrders").await?;
        let orders = self
            .orders
            .read()
            .map_err(|_| ApiError::Unavailable("orders lock poisoned".to_string()))?;
        Ok(ApiResponse::new(orders.clone()))
    }

    #[instrument(skip(self))]
    async fn get_customers(&self) -> ApiResult<Vec<Customer>> {
        self.behavior.simulate("getCustomers").await?;
        let customers = self
            .customers
            .read()
            .map_err(|_| ApiError::Unavailable("customers lock poisoned".to_string()))?;
        Ok(ApiResponse::new(customers.clone()))
    }
}
