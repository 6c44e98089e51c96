//! Tracing subscriber setup for hosts that don't install their own.

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "social_auth_bridge=info";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Global tracing subscriber already set: {0}")]
    AlreadyInitialized(String),
}

/// Builds the log filter.
///
/// `RUST_LOG` wins when set; otherwise `fallback` is parsed.
pub fn env_filter(fallback: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback)
            .map_err(|e| TelemetryError::InvalidFilter(e.to_string())),
    }
}

/// Installs the global tracing subscriber.
///
/// With `json` set, events are written as one JSON object per line.
pub fn init_tracing(fallback_filter: &str, json: bool) -> Result<(), TelemetryError> {
    let filter = env_filter(fallback_filter)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}
