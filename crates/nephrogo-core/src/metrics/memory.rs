//! In-process metrics clients: one that logs, one that records.

use std::sync::Mutex;

use super::{MetricsClient, MetricsError};

/// Emits every gauge as a tracing event and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMetrics;

impl MetricsClient for LoggingMetrics {
    fn gauge(&self, metric: &str, value: f64, tags: &[String]) -> Result<(), MetricsError> {
        tracing::info!(metric, value, tags = ?tags, "gauge");
        Ok(())
    }
}

/// One recorded gauge call.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSample {
    pub metric: String,
    pub value: f64,
    pub tags: Vec<String>,
}

/// Keeps every gauge in memory, in call order.
#[derive(Debug, Default)]
pub struct RecordingMetrics {
    samples: Mutex<Vec<GaugeSample>>,
}

impl RecordingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn samples(&self) -> Vec<GaugeSample> {
        self.samples
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl MetricsClient for RecordingMetrics {
    fn gauge(&self, metric: &str, value: f64, tags: &[String]) -> Result<(), MetricsError> {
        self.samples
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(GaugeSample {
                metric: metric.to_string(),
                value,
                tags: tags.to_vec(),
            });
        Ok(())
    }
}
