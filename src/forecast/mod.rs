// Forecast engine: utilization, growth rate, days-until-full and risk ranking.
// Pure functions over in-memory samples/snapshots; no I/O, no shared state.

mod format;
mod growth;
mod projection;

pub use format::{DEFAULT_PRECISION, format_bytes};
pub use growth::compute_growth_rate;
pub use projection::project_days_until_full;

use crate::error::ForecastError;
use crate::models::{
    FilesystemReport, GrowthAggregation, Sample, Severity, Snapshot, Suggestion, SummaryReport,
    normalize_mount,
};
use tracing::debug;

/// Binary gigabyte (2^30 bytes).
pub const BYTES_PER_GB: f64 = 1_073_741_824.0;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const DEFAULT_WINDOW_DAYS: u32 = 14;
pub const DEFAULT_TOP_RISKY_LIMIT: usize = 5;

/// Tunables for one report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastOptions {
    pub window_days: u32,
    pub top_risky_limit: usize,
    pub growth_aggregation: GrowthAggregation,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            top_risky_limit: DEFAULT_TOP_RISKY_LIMIT,
            growth_aggregation: GrowthAggregation::Mean,
        }
    }
}

/// One filesystem's current snapshot with its used-bytes history.
#[derive(Debug, Clone, PartialEq)]
pub struct FilesystemInput {
    pub snapshot: Snapshot,
    pub used_history: Vec<Sample>,
}

/// Builds the report for one filesystem.
///
/// Returns `Ok(None)` when the filesystem cannot be reported: total size is not positive,
/// or neither used bytes nor a used percentage was supplied.
pub fn build_filesystem_report(
    snapshot: &Snapshot,
    used_history: &[Sample],
    window_days: u32,
) -> Result<Option<FilesystemReport>, ForecastError> {
    let total = snapshot.total_bytes;
    if !total.is_finite() || total <= 0.0 {
        return Ok(None);
    }

    let (used_bytes, utilization_pct) = match (snapshot.used_bytes, snapshot.percent_used) {
        (Some(used), _) if used.is_finite() => {
            let used = used.clamp(0.0, total);
            (used, round_to(used / total * 100.0, 1))
        }
        (_, Some(pct)) if pct.is_finite() => {
            let pct = pct.clamp(0.0, 100.0);
            (total * (pct / 100.0), round_to(pct, 1))
        }
        _ => return Ok(None),
    };

    let growth_rate_gb_per_day = compute_growth_rate(used_history, window_days)?;
    let projection = project_days_until_full(total, used_bytes, growth_rate_gb_per_day);

    Ok(Some(FilesystemReport {
        host: snapshot.host.clone(),
        mount: normalize_mount(&snapshot.mount),
        total_bytes: total,
        used_bytes,
        utilization_pct,
        growth_rate_gb_per_day,
        days_until_full: projection.days,
        risk_bucket: projection.bucket,
        critical_count: snapshot.critical_trigger_count,
        warning_count: snapshot.warning_trigger_count,
        severity: Severity::from_counts(
            snapshot.critical_trigger_count,
            snapshot.warning_trigger_count,
        ),
        suggestion: Suggestion::classify(growth_rate_gb_per_day, utilization_pct),
    }))
}

/// Builds reports for every input, silently dropping filesystems that cannot be reported.
pub fn build_reports(
    inputs: &[FilesystemInput],
    options: &ForecastOptions,
) -> Result<Vec<FilesystemReport>, ForecastError> {
    let mut reports = Vec::with_capacity(inputs.len());
    for input in inputs {
        match build_filesystem_report(&input.snapshot, &input.used_history, options.window_days)? {
            Some(report) => reports.push(report),
            None => debug!(
                host = %input.snapshot.host,
                mount = %input.snapshot.mount,
                "Filesystem skipped: missing total or usage"
            ),
        }
    }
    Ok(reports)
}

/// Aggregates per-filesystem reports. An empty slice yields zeroed totals and no risky entries.
///
/// Fails with [`ForecastError::InvalidArgument`] when `top_risky_limit` is 0.
pub fn build_summary_report(
    reports: &[FilesystemReport],
    options: &ForecastOptions,
) -> Result<SummaryReport, ForecastError> {
    if options.top_risky_limit == 0 {
        return Err(ForecastError::InvalidArgument(
            "top_risky_limit must be >= 1".into(),
        ));
    }
    let total_bytes: f64 = reports.iter().map(|r| r.total_bytes).sum();
    let used_bytes: f64 = reports.iter().map(|r| r.used_bytes).sum();
    let overall_utilization_pct = if total_bytes > 0.0 {
        round_to(used_bytes / total_bytes * 100.0, 1)
    } else {
        0.0
    };

    let growth_sum: f64 = reports.iter().map(|r| r.growth_rate_gb_per_day).sum();
    let average_growth_rate_gb_per_day = match options.growth_aggregation {
        _ if reports.is_empty() => 0.0,
        GrowthAggregation::Mean => round_to(growth_sum / reports.len() as f64, 2),
        GrowthAggregation::Sum => round_to(growth_sum, 2),
    };

    Ok(SummaryReport {
        total_bytes,
        used_bytes,
        overall_utilization_pct,
        average_growth_rate_gb_per_day,
        growth_aggregation: options.growth_aggregation,
        top_risky: top_risky(reports, options.top_risky_limit),
    })
}

/// Filesystems with positive growth, soonest-full first (ties: host, then mount), at most `limit`.
pub fn top_risky(reports: &[FilesystemReport], limit: usize) -> Vec<FilesystemReport> {
    let mut risky: Vec<&FilesystemReport> = reports
        .iter()
        .filter(|r| r.growth_rate_gb_per_day > 0.0)
        .collect();
    risky.sort_by(|a, b| {
        a.projection()
            .sort_key()
            .cmp(&b.projection().sort_key())
            .then_with(|| a.host.cmp(&b.host))
            .then_with(|| a.mount.cmp(&b.mount))
    });
    risky.into_iter().take(limit).cloned().collect()
}

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
