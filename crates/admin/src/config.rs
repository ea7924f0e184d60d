//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ADMIN_API_LATENCY_MS` - Simulated admin API latency (default: 300)
//! - `ADMIN_ITEMS_PER_PAGE` - Rows per page in admin tables (default: 10)
//! - `ADMIN_SALES_SERIES_DAYS` - Days covered by the generated sales chart (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::time::Duration;

use larder_core::telemetry::TelemetryConfig;
use thiserror::Error;

const DEFAULT_LATENCY_MS: u64 = 300;
const DEFAULT_ITEMS_PER_PAGE: usize = 10;
const DEFAULT_SALES_SERIES_DAYS: u32 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin dashboard configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Artificial delay applied to every admin API call
    pub api_latency: Duration,
    /// Rows per page in the orders, customers, and inventory tables
    pub items_per_page: usize,
    /// Length of the generated sales series
    pub sales_series_days: u32,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            sales_series_days: DEFAULT_SALES_SERIES_DAYS,
            sentry_dsn: None,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed or is zero where a
    /// positive number is required.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let latency_ms = get_or_default(&lookup, "ADMIN_API_LATENCY_MS", DEFAULT_LATENCY_MS)?;
        let items_per_page = get_positive(&lookup, "ADMIN_ITEMS_PER_PAGE", DEFAULT_ITEMS_PER_PAGE)?;
        let sales_series_days =
            get_positive(&lookup, "ADMIN_SALES_SERIES_DAYS", DEFAULT_SALES_SERIES_DAYS)?;

        Ok(Self {
            api_latency: Duration::from_millis(latency_ms),
            items_per_page,
            sales_series_days,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
        })
    }

    /// Telemetry settings for this crate's log target.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig::new("larder_admin=info,larder_core=info", self.sentry_dsn.clone())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn get_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

fn get_positive<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let value = get_or_default(lookup, key, default)?;
    if value == T::default() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(value)
}
