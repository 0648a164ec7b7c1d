//! `nephrogo gauge` – send one gauge measurement.

use anyhow::Result;
use nephrogo_core::config::NephrogoConfig;
use nephrogo_core::metrics::{self, MetricsClient, RecordingMetrics};

pub async fn run_gauge(
    cfg: &NephrogoConfig,
    metric: String,
    value: f64,
    tags: Vec<String>,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        let recorder = RecordingMetrics::new();
        recorder.gauge(&metric, value, &tags)?;
        for sample in recorder.samples() {
            println!("{} {} [{}]", sample.metric, sample.value, sample.tags.join(","));
        }
        return Ok(());
    }

    let client = metrics::from_config(cfg)?;
    // Datadog submission is a blocking curl transfer.
    let sent = metric.clone();
    tokio::task::spawn_blocking(move || client.gauge(&metric, value, &tags)).await??;
    println!("sent {sent}");
    Ok(())
}
