//! Larder Core - Shared types and state primitives.
//!
//! This crate provides the pieces shared by every Larder component:
//! - `storefront` - Cart, catalog, and checkout state
//! - `admin` - Back-office dashboard state
//!
//! # Architecture
//!
//! The core crate holds types, the observable [`Store`] container, and pure
//! helpers. It performs no I/O beyond telemetry setup.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and statuses
//! - [`api`] - Typed envelope, errors, and latency simulation for mock APIs
//! - [`store`] - Observable state container backed by a watch channel
//! - [`pagination`] - Page windows and page-number lists
//! - [`search`] - Text search, sorting, and range filters
//! - [`resource`] - Loading/error/data state for async resources
//! - [`notify`] - User-facing notifications (toasts)
//! - [`telemetry`] - Tracing and Sentry initialisation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod notify;
pub mod pagination;
pub mod resource;
pub mod search;
pub mod store;
pub mod telemetry;
pub mod types;

pub use api::{ApiError, ApiResponse, ApiResult, MockBehavior};
pub use notify::{MemoryNotifier, Notification, NotificationLevel, Notifier, TracingNotifier};
pub use pagination::{ELLIPSIS, PageLink, Pagination};
pub use resource::{FetchTicket, ResourceState};
pub use store::Store;
pub use types::*;
