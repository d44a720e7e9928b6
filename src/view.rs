// Presentation view of a disk analysis: raw numbers plus display strings.
// The byte formatter is supplied by the caller.

use serde::Serialize;

use crate::analysis::DiskAnalysis;
use crate::models::{FilesystemReport, GrowthAggregation, RiskBucket, Severity, Suggestion};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesystemRow {
    pub host: String,
    pub mount: String,
    pub total_bytes: f64,
    pub used_bytes: f64,
    pub total_space: String,
    pub used_space: String,
    pub usage_pct: f64,
    pub growth_rate: f64,
    pub days_until_full: String,
    pub days_until_full_value: Option<i64>,
    pub risk_bucket: RiskBucket,
    pub fs_warnings: u32,
    pub fs_critical: u32,
    pub severity: Severity,
    pub suggestion: Suggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub total_storage: String,
    pub used_storage: String,
    pub usage_pct: f64,
    pub avg_growth: String,
    pub growth_aggregation: GrowthAggregation,
    pub risky_filesystems: Vec<FilesystemRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub filesystems: Vec<FilesystemRow>,
    pub summary: SummaryView,
}

impl ReportView {
    pub fn render<F>(analysis: &DiskAnalysis, format_bytes: F) -> Self
    where
        F: Fn(f64) -> String,
    {
        let summary = &analysis.summary;
        let row = |r: &FilesystemReport| FilesystemRow {
            host: r.host.clone(),
            mount: r.mount.clone(),
            total_bytes: r.total_bytes,
            used_bytes: r.used_bytes,
            total_space: format_bytes(r.total_bytes),
            used_space: format_bytes(r.used_bytes),
            usage_pct: r.utilization_pct,
            growth_rate: r.growth_rate_gb_per_day,
            days_until_full: r.projection().to_string(),
            days_until_full_value: r.days_until_full,
            risk_bucket: r.risk_bucket,
            fs_warnings: r.warning_count,
            fs_critical: r.critical_count,
            severity: r.severity,
            suggestion: r.suggestion,
        };

        ReportView {
            filesystems: analysis.filesystems.iter().map(row).collect(),
            summary: SummaryView {
                total_storage: format_bytes(summary.total_bytes),
                used_storage: format!(
                    "{} ({}% of total capacity)",
                    format_bytes(summary.used_bytes),
                    summary.overall_utilization_pct
                ),
                usage_pct: summary.overall_utilization_pct,
                avg_growth: format!("{} GB/day", summary.average_growth_rate_gb_per_day),
                growth_aggregation: summary.growth_aggregation,
                risky_filesystems: summary.top_risky.iter().map(row).collect(),
            },
        }
    }
}
