//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for storefront actions. Failures that
//! reach the user go through [`AppError::report`], which captures server-side
//! failures to Sentry and logs them before a notification is shown.

use larder_core::ApiError;
use thiserror::Error;

use crate::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Checkout form or cart was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Message safe to show in a toast.
    ///
    /// Outage and configuration details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(ApiError::Unavailable(_)) => {
                "The store is not responding. Please try again.".to_string()
            }
            Self::Api(ApiError::NotFound { entity, .. }) => format!("{entity} not found"),
            Self::Api(ApiError::Invalid(msg)) | Self::BadRequest(msg) => msg.clone(),
            Self::Checkout(err) => err.to_string(),
        }
    }

    /// Whether this failure is the system's fault rather than the user's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Api(ApiError::Unavailable(_)) | Self::Checkout(CheckoutError::Pricing(_))
        )
    }

    /// Capture server errors to Sentry and log everything.
    pub fn report(&self, action: &str) {
        if self.is_server_error() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                action,
                sentry_event_id = %event_id,
                "Storefront action failed"
            );
        } else {
            tracing::warn!(error = %self, action, "Storefront action rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: Your cart is empty");
        assert_eq!(err.user_message(), "Your cart is empty");
        assert!(!err.is_server_error());

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_user_message_hides_outage_detail() {
        let err = AppError::from(ApiError::Unavailable("getProducts failed".to_string()));
        assert!(err.is_server_error());
        assert!(!err.user_message().contains("getProducts"));
    }

    #[test]
    fn test_user_message_for_missing_product() {
        let err = AppError::from(ApiError::not_found("Product", "P9"));
        assert!(!err.is_server_error());
        assert_eq!(err.user_message(), "Product not found");
    }

    #[test]
    fn test_report_does_not_panic_without_sentry() {
        AppError::from(ApiError::Unavailable("x".to_string())).report("test");
        AppError::BadRequest("y".to_string()).report("test");
    }
}
