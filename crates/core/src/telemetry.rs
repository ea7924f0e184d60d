//! Tracing and Sentry initialisation.
//!
//! Call [`init`] once from the composition root. It installs a
//! `tracing-subscriber` registry with an `EnvFilter` (falling back to the
//! given default when `RUST_LOG` is unset), a fmt layer, and the Sentry
//! tracing layer. Sentry itself is only started when a DSN is supplied; keep
//! the returned guard alive for as long as events should be delivered.

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the log format (`json` or anything else).
pub const LOG_FORMAT_ENV: &str = "LARDER_LOG_FORMAT";

/// Telemetry settings.
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub default_filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Sentry DSN; `None` disables error tracking.
    pub sentry_dsn: Option<String>,
}

impl TelemetryConfig {
    /// Settings with the given default filter, reading `LARDER_LOG_FORMAT`.
    #[must_use]
    pub fn new(default_filter: &str, sentry_dsn: Option<String>) -> Self {
        let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|value| value.eq_ignore_ascii_case("json"));
        Self {
            default_filter: default_filter.to_string(),
            json,
            sentry_dsn,
        }
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(dsn: Option<&str>) -> Option<sentry::ClientInitGuard> {
    let dsn = dsn?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the global subscriber.
///
/// Returns the Sentry guard when a DSN was configured. Calling this twice is
/// harmless: the second registry install is rejected and logged.
pub fn init(config: &TelemetryConfig) -> Option<sentry::ClientInitGuard> {
    // Sentry must be initialised before the subscriber so the layer has a hub.
    let guard = init_sentry(config.sentry_dsn.as_deref());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .try_init();

    match installed {
        Ok(()) => tracing::info!(sentry = guard.is_some(), "telemetry initialised"),
        Err(e) => tracing::debug!(error = %e, "tracing subscriber already installed"),
    }

    guard
}
