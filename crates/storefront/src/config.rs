//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `STOREFRONT_API_LATENCY_MS` - Simulated catalog API latency (default: 300)
//! - `STOREFRONT_PRODUCTS_PER_PAGE` - Product grid page size (default: 12)
//! - `STOREFRONT_CURRENCY` - ISO 4217 currency code (default: USD)
//! - `STOREFRONT_SHIPPING_FLAT` - Flat shipping charge (default: 5.99)
//! - `STOREFRONT_FREE_SHIPPING_OVER` - Subtotal at which shipping is free (default: 50)
//! - `STOREFRONT_TAX_RATE` - Tax rate as a fraction (default: 0.08)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::str::FromStr;
use std::time::Duration;

use larder_core::CurrencyCode;
use larder_core::telemetry::TelemetryConfig;
use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Artificial delay applied to every catalog API call
    pub api_latency: Duration,
    /// Products shown per catalog page
    pub products_per_page: usize,
    /// Store currency
    pub currency: CurrencyCode,
    /// Checkout pricing rules
    pub checkout: CheckoutConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Shipping and tax rules applied at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Shipping charged below the free-shipping threshold
    pub flat_shipping: Decimal,
    /// Subtotal at or above which shipping is free
    pub free_shipping_over: Decimal,
    /// Tax rate as a fraction of the subtotal
    pub tax_rate: Decimal,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            flat_shipping: Decimal::new(599, 2),
            free_shipping_over: Decimal::new(50, 0),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_latency: Duration::from_millis(300),
            products_per_page: 12,
            currency: CurrencyCode::USD,
            checkout: CheckoutConfig::default(),
            sentry_dsn: None,
        }
    }
}

impl StorefrontConfig {
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
    /// Returns `ConfigError` if a value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let checkout_defaults = CheckoutConfig::default();

        let latency_ms: u64 = parse_or(&lookup, "STOREFRONT_API_LATENCY_MS", 300)?;
        let products_per_page: usize =
            parse_or(&lookup, "STOREFRONT_PRODUCTS_PER_PAGE", defaults.products_per_page)?;
        if products_per_page == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_PRODUCTS_PER_PAGE".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let checkout = CheckoutConfig {
            flat_shipping: parse_or(
                &lookup,
                "STOREFRONT_SHIPPING_FLAT",
                checkout_defaults.flat_shipping,
            )?,
            free_shipping_over: parse_or(
                &lookup,
                "STOREFRONT_FREE_SHIPPING_OVER",
                checkout_defaults.free_shipping_over,
            )?,
            tax_rate: parse_or(&lookup, "STOREFRONT_TAX_RATE", checkout_defaults.tax_rate)?,
        };

        Ok(Self {
            api_latency: Duration::from_millis(latency_ms),
            products_per_page,
            currency: parse_or(&lookup, "STOREFRONT_CURRENCY", defaults.currency)?,
            checkout,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
        })
    }

    /// Telemetry settings for this crate's log target.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig::new("larder_storefront=info,larder_core=info", self.sentry_dsn.clone())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if present, otherwise return `default`.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
