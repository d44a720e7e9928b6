// Shared test helpers
#![allow(dead_code)]

use disk_analyser::models::*;

pub const GB: f64 = 1_073_741_824.0;
pub const DAY: i64 = 86_400;

/// One sample per day starting at `start`, growing linearly by `per_day_gb`.
pub fn daily_series(start: i64, days: i64, start_gb: f64, per_day_gb: f64) -> Vec<Sample> {
    (0..=days)
        .map(|d| Sample::new(start + d * DAY, (start_gb + per_day_gb * d as f64) * GB))
        .collect()
}

/// A report with the given growth and horizon; 50 of 100 GB used, no triggers.
pub fn report(host: &str, mount: &str, growth: f64, days: Option<i64>) -> FilesystemReport {
    let projection = days.map(Projection::from_days).unwrap_or(Projection::STABLE);
    FilesystemReport {
        host: host.into(),
        mount: mount.into(),
        total_bytes: 100.0 * GB,
        used_bytes: 50.0 * GB,
        utilization_pct: 50.0,
        growth_rate_gb_per_day: growth,
        days_until_full: projection.days,
        risk_bucket: projection.bucket,
        critical_count: 0,
        warning_count: 0,
        severity: Severity::Normal,
        suggestion: Suggestion::NoAction,
    }
}
