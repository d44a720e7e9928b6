// Report pipeline: fetch snapshots and history from a source, then run the forecast engine.

use futures_util::{StreamExt, stream};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::ForecastError;
use crate::forecast::{self, FilesystemInput, ForecastOptions};
use crate::models::{FilesystemReport, MetricType, Sample, Snapshot, SnapshotFilter, SummaryReport};
use crate::source::MonitoringSource;

/// Per-filesystem reports plus the fleet summary for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskAnalysis {
    pub filesystems: Vec<FilesystemReport>,
    pub summary: SummaryReport,
}

/// Fetches everything matching `filter` and computes the reports.
/// History is fetched for at most `concurrency` filesystems at a time.
///
/// A failed history fetch degrades that filesystem to "no trend" instead of failing the batch.
#[instrument(skip(source, options), fields(operation = "run_report", window_days = options.window_days))]
pub async fn run_report<S: MonitoringSource>(
    source: &S,
    filter: &SnapshotFilter,
    options: &ForecastOptions,
    concurrency: usize,
) -> anyhow::Result<DiskAnalysis> {
    if options.window_days == 0 {
        return Err(ForecastError::InvalidArgument("window_days must be >= 1".into()).into());
    }
    if options.top_risky_limit == 0 {
        return Err(ForecastError::InvalidArgument("top_risky_limit must be >= 1".into()).into());
    }

    let snapshots = source.fetch_snapshots(filter).await?;
    let fetched = snapshots.len();
    let window_days = options.window_days;

    let inputs: Vec<FilesystemInput> = stream::iter(
        snapshots
            .into_iter()
            .filter(|s| s.total_bytes.is_finite() && s.total_bytes > 0.0),
    )
    .map(|snapshot| async move {
        let used_history = used_history(source, &snapshot, window_days).await;
        FilesystemInput {
            snapshot,
            used_history,
        }
    })
    .buffered(concurrency.max(1))
    .collect()
    .await;

    let filesystems = forecast::build_reports(&inputs, options)?;
    let summary = forecast::build_summary_report(&filesystems, options)?;
    info!(
        snapshots = fetched,
        reported = filesystems.len(),
        risky = summary.top_risky.len(),
        "Disk analysis complete"
    );
    Ok(DiskAnalysis {
        filesystems,
        summary,
    })
}

/// Used-bytes history for a filesystem. Falls back to the used-percentage series, scaled by the
/// current total, when the source has no used-bytes series.
async fn used_history<S: MonitoringSource>(
    source: &S,
    snapshot: &Snapshot,
    window_days: u32,
) -> Vec<Sample> {
    let used = fetch_or_empty(source, snapshot, MetricType::Used, window_days).await;
    if !used.is_empty() || snapshot.percent_used.is_none() {
        return used;
    }
    let total = snapshot.total_bytes;
    fetch_or_empty(source, snapshot, MetricType::PercentUsed, window_days)
        .await
        .into_iter()
        .map(|s| Sample::new(s.timestamp, total * (s.value / 100.0)))
        .collect()
}

async fn fetch_or_empty<S: MonitoringSource>(
    source: &S,
    snapshot: &Snapshot,
    metric: MetricType,
    window_days: u32,
) -> Vec<Sample> {
    match source
        .fetch_history(&snapshot.host, &snapshot.mount, metric, window_days)
        .await
    {
        Ok(samples) => samples,
        Err(e) => {
            warn!(
                error = %e,
                host = %snapshot.host,
                mount = %snapshot.mount,
                %metric,
                "History fetch failed; treating filesystem as stable"
            );
            Vec::new()
        }
    }
}
