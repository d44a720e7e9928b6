// Derived reports: one per filesystem plus the fleet summary.
// Pure values; rebuilt on every report request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizon classification of a days-until-full projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskBucket {
    AlreadyFull,
    Days,
    Months,
    Years,
    Stable,
}

/// Days until a filesystem fills up at its current growth rate.
/// `days` is `None` when there is no positive growth (Stable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub days: Option<i64>,
    pub bucket: RiskBucket,
}

impl Projection {
    pub const STABLE: Projection = Projection {
        days: None,
        bucket: RiskBucket::Stable,
    };

    /// Classifies a numeric horizon. Non-positive horizons collapse to AlreadyFull with 0 days.
    pub fn from_days(days: i64) -> Self {
        if days <= 0 {
            return Projection {
                days: Some(0),
                bucket: RiskBucket::AlreadyFull,
            };
        }
        let bucket = if days > 365 {
            RiskBucket::Years
        } else if days > 30 {
            RiskBucket::Months
        } else {
            RiskBucket::Days
        };
        Projection {
            days: Some(days),
            bucket,
        }
    }

    pub fn is_stable(&self) -> bool {
        self.days.is_none()
    }

    /// Ordering key for risk rankings: fewer days first, stable last.
    pub fn sort_key(&self) -> i64 {
        self.days.unwrap_or(i64::MAX)
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.days.unwrap_or(0);
        match self.bucket {
            RiskBucket::Stable => f.write_str("Stable"),
            RiskBucket::AlreadyFull => f.write_str("Already full"),
            RiskBucket::Years => write!(f, "{} years {} months", days / 365, (days % 365) / 30),
            RiskBucket::Months => write!(f, "{} months {} days", days / 30, days % 30),
            RiskBucket::Days => write!(f, "{} days", days),
        }
    }
}

/// Display-risk flag derived from monitoring trigger counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn from_counts(critical: u32, warning: u32) -> Self {
        if critical > 0 {
            Severity::Critical
        } else if warning > 0 {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

/// Operator hint for a filesystem, from growth rate (GB/day) and utilization (%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Suggestion {
    /// Reallocate or clean up now.
    Immediate,
    /// Review the capacity plan.
    Review,
    #[serde(rename = "none")]
    NoAction,
}

impl Suggestion {
    pub fn classify(growth_rate_gb_per_day: f64, utilization_pct: f64) -> Self {
        if growth_rate_gb_per_day > 3.0 && utilization_pct > 70.0 {
            Suggestion::Immediate
        } else if growth_rate_gb_per_day > 1.0 && utilization_pct > 50.0 {
            Suggestion::Review
        } else {
            Suggestion::NoAction
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesystemReport {
    pub host: String,
    pub mount: String,
    pub total_bytes: f64,
    pub used_bytes: f64,
    /// Percent in [0, 100], one decimal.
    pub utilization_pct: f64,
    /// GB/day (binary GB), never negative, two decimals.
    pub growth_rate_gb_per_day: f64,
    pub days_until_full: Option<i64>,
    pub risk_bucket: RiskBucket,
    pub critical_count: u32,
    pub warning_count: u32,
    pub severity: Severity,
    pub suggestion: Suggestion,
}

impl FilesystemReport {
    pub fn projection(&self) -> Projection {
        Projection {
            days: self.days_until_full,
            bucket: self.risk_bucket,
        }
    }
}

/// How per-filesystem growth rates are combined in the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthAggregation {
    /// Arithmetic mean: the typical per-filesystem rate.
    #[default]
    Mean,
    /// Sum: the fleet-wide rate.
    Sum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub total_bytes: f64,
    pub used_bytes: f64,
    pub overall_utilization_pct: f64,
    pub average_growth_rate_gb_per_day: f64,
    pub growth_aggregation: GrowthAggregation,
    pub top_risky: Vec<FilesystemReport>,
}
