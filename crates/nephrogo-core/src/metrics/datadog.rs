//! Datadog series API client.
//!
//! Uses the curl crate (libcurl) to POST one gauge series per call to
//! `/api/v1/series`. Blocking; call from `spawn_blocking` in async code.

use serde::Serialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::{MetricsClient, MetricsError};
use crate::config::DatadogSettings;

#[derive(Debug, Serialize)]
struct SeriesBody<'a> {
    series: [Series<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Series<'a> {
    metric: &'a str,
    points: [(u64, f64); 1],
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "no_tags")]
    tags: &'a [String],
}

fn no_tags(tags: &&[String]) -> bool {
    tags.is_empty()
}

/// JSON body for a single gauge point at `timestamp` (unix seconds).
pub fn series_payload(
    metric: &str,
    value: f64,
    tags: &[String],
    timestamp: u64,
) -> Result<String, MetricsError> {
    let body = SeriesBody {
        series: [Series {
            metric,
            points: [(timestamp, value)],
            kind: "gauge",
            tags,
        }],
    };
    Ok(serde_json::to_string(&body)?)
}

#[derive(Debug, Clone)]
pub struct DatadogClient {
    settings: DatadogSettings,
    series_url: String,
}

impl DatadogClient {
    pub fn new(settings: DatadogSettings) -> Result<Self, MetricsError> {
        if settings.api_key.trim().is_empty() {
            return Err(MetricsError::NotConfigured(
                "datadog api_key is empty".to_string(),
            ));
        }
        let series_url = format!("{}/api/v1/series", settings.api_host.trim_end_matches('/'));
        Ok(Self {
            settings,
            series_url,
        })
    }

    pub fn series_url(&self) -> &str {
        &self.series_url
    }

    fn post(&self, body: &str) -> Result<(), MetricsError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(&self.series_url)?;
        easy.post(true)?;
        easy.post_fields_copy(body.as_bytes())?;
        easy.connect_timeout(Duration::from_secs(5))?;
        easy.timeout(Duration::from_secs(self.settings.timeout_secs))?;

        let mut list = curl::easy::List::new();
        list.append("Content-Type: application/json")?;
        list.append(&format!("DD-API-KEY: {}", self.settings.api_key.trim()))?;
        if let Some(app_key) = &self.settings.app_key {
            list.append(&format!("DD-APPLICATION-KEY: {}", app_key.trim()))?;
        }
        easy.http_headers(list)?;

        let mut response = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(MetricsError::Http {
                status,
                body: String::from_utf8_lossy(&response).into_owned(),
            });
        }
        Ok(())
    }
}

impl MetricsClient for DatadogClient {
    fn gauge(&self, metric: &str, value: f64, tags: &[String]) -> Result<(), MetricsError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let body = series_payload(metric, value, tags, timestamp)?;
        self.post(&body)?;
        tracing::debug!(metric, value, "gauge sent to datadog");
        Ok(())
    }
}
