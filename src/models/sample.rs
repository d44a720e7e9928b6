// Historical samples for a single filesystem metric

use serde::{Deserialize, Serialize};

/// One observed (timestamp, value) pair. `timestamp` is seconds since epoch, `value` is bytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub timestamp: i64,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// A sample is usable when its value is a finite, non-negative byte count.
    pub fn is_valid(&self) -> bool {
        self.value.is_finite() && self.value >= 0.0
    }
}

/// Which filesystem dimension a metric series measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Total,
    Used,
    Free,
    #[serde(rename = "pused")]
    PercentUsed,
    #[serde(rename = "pfree")]
    PercentFree,
}

impl MetricType {
    /// Mode name as it appears in monitoring item keys.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Total => "total",
            MetricType::Used => "used",
            MetricType::Free => "free",
            MetricType::PercentUsed => "pused",
            MetricType::PercentFree => "pfree",
        }
    }

    /// Case-insensitive parse of an item-key mode.
    pub fn from_mode(mode: &str) -> Option<Self> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "total" => Some(MetricType::Total),
            "used" => Some(MetricType::Used),
            "free" => Some(MetricType::Free),
            "pused" => Some(MetricType::PercentUsed),
            "pfree" => Some(MetricType::PercentFree),
            _ => None,
        }
    }
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
