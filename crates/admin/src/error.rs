//! Unified error handling for admin.

use larder_core::ApiError;
use thiserror::Error;

/// Application-level error type for the admin dashboard.
#[derive(Debug, Error)]
pub enum AppError {
    /// Admin API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl AppError {
    /// Message shown in the dashboard toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        // Don't expose internal error details
        match self {
            Self::Api(ApiError::Unavailable(_)) => "External service error".to_string(),
            Self::Api(ApiError::NotFound { entity, .. }) => format!("{entity} not found"),
            Self::Api(ApiError::Invalid(msg)) => msg.clone(),
        }
    }

    /// Log the failure, capturing server errors with Sentry.
    pub fn report(&self, action: &str) {
        if matches!(self, Self::Api(ApiError::Unavailable(_))) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                action,
                sentry_event_id = %event_id,
                "Admin action failed"
            );
        } else {
            tracing::warn!(error = %self, action, "Admin action rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
