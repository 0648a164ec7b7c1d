//! Metrics reporting.
//!
//! Clients are constructed explicitly at startup and handed to whoever needs
//! them as `Arc<dyn MetricsClient>`; there is no process-wide instance.

mod datadog;
mod memory;

use std::sync::Arc;
use thiserror::Error;

use crate::config::NephrogoConfig;

pub use datadog::{series_payload, DatadogClient};
pub use memory::{GaugeSample, LoggingMetrics, RecordingMetrics};

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics client not configured: {0}")]
    NotConfigured(String),
    #[error("metrics transport: {0}")]
    Transport(#[from] curl::Error),
    #[error("metrics API returned HTTP {status}: {body}")]
    Http { status: u32, body: String },
    #[error("metrics payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Sink for gauge measurements.
pub trait MetricsClient: Send + Sync {
    /// Records `value` for `metric` at the current time.
    fn gauge(&self, metric: &str, value: f64, tags: &[String]) -> Result<(), MetricsError>;
}

/// Datadog client when `[datadog]` is configured, otherwise a logging-only client.
pub fn from_config(cfg: &NephrogoConfig) -> Result<Arc<dyn MetricsClient>, MetricsError> {
    match &cfg.datadog {
        Some(settings) => Ok(Arc::new(DatadogClient::new(settings.clone())?)),
        None => {
            tracing::debug!("no [datadog] section; gauges will only be logged");
            Ok(Arc::new(LoggingMetrics))
        }
    }
}
