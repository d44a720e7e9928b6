// Current state of one filesystem, as supplied by a monitoring source

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub host: String,
    pub mount: String,
    pub total_bytes: f64,
    /// Reported used bytes. Preferred over `percent_used` when both are present.
    #[serde(default)]
    pub used_bytes: Option<f64>,
    #[serde(default)]
    pub percent_used: Option<f64>,
    #[serde(default)]
    pub critical_trigger_count: u32,
    #[serde(default)]
    pub warning_trigger_count: u32,
}

impl Snapshot {
    /// Snapshot with usage reported in bytes. The mount is normalized.
    pub fn with_used_bytes(host: &str, mount: &str, total_bytes: f64, used_bytes: f64) -> Self {
        Self {
            host: host.to_string(),
            mount: normalize_mount(mount),
            total_bytes,
            used_bytes: Some(used_bytes),
            percent_used: None,
            critical_trigger_count: 0,
            warning_trigger_count: 0,
        }
    }

    /// Snapshot with usage reported as a percentage of total. The mount is normalized.
    pub fn with_percent_used(host: &str, mount: &str, total_bytes: f64, percent_used: f64) -> Self {
        Self {
            host: host.to_string(),
            mount: normalize_mount(mount),
            total_bytes,
            used_bytes: None,
            percent_used: Some(percent_used),
            critical_trigger_count: 0,
            warning_trigger_count: 0,
        }
    }

    pub fn with_triggers(mut self, critical: u32, warning: u32) -> Self {
        self.critical_trigger_count = critical;
        self.warning_trigger_count = warning;
        self
    }
}

/// Normalizes a mount path: surrounding quotes and whitespace are stripped, empty becomes `/`.
pub fn normalize_mount(mount: &str) -> String {
    let trimmed = mount.trim().trim_matches('"').trim();
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Which hosts a report covers. An empty filter matches every host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFilter {
    /// Exact host names. Empty = any host.
    #[serde(default)]
    pub hosts: Vec<String>,
    /// Case-insensitive substring of the host name.
    #[serde(default)]
    pub host: Option<String>,
}

impl SnapshotFilter {
    pub fn matches(&self, host: &str) -> bool {
        if !self.hosts.is_empty() && !self.hosts.iter().any(|h| h == host) {
            return false;
        }
        match self.host.as_deref().map(str::trim) {
            Some(pattern) if !pattern.is_empty() => host
                .to_ascii_lowercase()
                .contains(&pattern.to_ascii_lowercase()),
            _ => true,
        }
    }
}
