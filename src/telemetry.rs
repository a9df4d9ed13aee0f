use crate::error::{Result, ScraperError};
use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::path::Path;
use tracing::{debug, info};

pub const SOURCES_SKIPPED: &str = "props_sources_skipped_total";
pub const ROWS_MERGED: &str = "props_rows_merged_total";
pub const ROWS_DROPPED: &str = "props_rows_dropped_total";
pub const ROWS_PUBLISHED: &str = "props_rows_published_total";

/// Installs the process-wide Prometheus recorder. Counters recorded before
/// this call, or when it fails, are discarded.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ScraperError::Config(format!("Failed to install Prometheus recorder: {}", e)))?;
    describe_counters();
    info!("Metrics recorder installed");
    Ok(handle)
}

pub fn describe_counters() {
    describe_counter!(SOURCES_SKIPPED, "Table sources left out of a run");
    describe_counter!(ROWS_MERGED, "Records merged across table sources");
    describe_counter!(ROWS_DROPPED, "Merged records dropped for lacking an away side");
    describe_counter!(ROWS_PUBLISHED, "Rows written to a destination");
}

/// Writes the current exposition text to `path` (node-exporter textfile format),
/// replacing any previous file.
pub async fn write_textfile(handle: &PrometheusHandle, path: &Path) -> Result<()> {
    let rendered = handle.render();
    debug!("Metrics:\n{}", rendered);

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await?;
    }
    let mut staging = path.as_os_str().to_os_string();
    staging.push(".tmp");
    tokio::fs::write(&staging, rendered).await?;
    tokio::fs::rename(&staging, path).await?;

    info!("Wrote metrics to {}", path.display());
    Ok(())
}
