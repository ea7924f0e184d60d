//! Larder admin library.
//!
//! Dashboard state for store operators: headline stats, the sales chart,
//! inventory with low-stock alerts, the order status log, notification
//! settings, campaigns, and the orders/customers tables. Everything is
//! reachable from [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod resources;
pub mod sales;
pub mod state;
pub mod store;

pub use api::{AdminApi, MockAdminApi};
pub use config::{AdminConfig, ConfigError};
pub use error::AppError;
pub use resources::{CustomersResource, OrdersResource};
pub use sales::generate_sales_series;
pub use state::AppState;
pub use store::{AdminState, AdminStore};
