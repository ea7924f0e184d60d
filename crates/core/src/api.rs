//! Shared contract for the in-process mock APIs.
//!
//! The storefront's catalog API and the admin's orders/customers API are
//! in-process traits, not network clients. They share the typed envelope
//! [`ApiResponse`], the error enum [`ApiError`], and [`MockBehavior`], which
//! simulates latency and one-shot failures.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Successful API payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { data }
    }
}

/// Errors returned by the mock APIs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The requested record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The request payload was rejected.
    #[error("Invalid request: {0}")]
    Invalid(String),

    /// The service failed to answer (simulated outage).
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// Shorthand for [`ApiError::NotFound`].
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result alias for API calls.
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Latency and failure injection shared by mock API implementations.
#[derive(Debug, Default)]
pub struct MockBehavior {
    latency: Duration,
    fail_next: AtomicBool,
}

impl MockBehavior {
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self {
            latency,
            fail_next: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    /// Make the next call fail with [`ApiError::Unavailable`].
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Wait out the simulated latency, then fail if a failure was armed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unavailable`] once after [`Self::fail_next`].
    pub async fn simulate(&self, operation: &str) -> Result<(), ApiError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.fail_next.swap(false, Ordering::SeqCst) {
            tracing::debug!(operation, "simulated API failure");
            return Err(ApiError::Unavailable(format!("{operation} failed")));
        }
        Ok(())
    }
}
