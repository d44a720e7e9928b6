// Monitoring-source boundary: where snapshots and history come from.
// The forecast engine never talks to a source directly; `analysis` wires them together.

use std::collections::HashMap;
use std::future::Future;

use crate::models::{MetricType, Sample, Snapshot, SnapshotFilter, normalize_mount};

/// Read access to a monitoring system's filesystem items and their history.
pub trait MonitoringSource: Send + Sync {
    /// Current state of every filesystem whose host matches `filter`.
    fn fetch_snapshots(
        &self,
        filter: &SnapshotFilter,
    ) -> impl Future<Output = anyhow::Result<Vec<Snapshot>>> + Send;

    /// Samples of one metric for (host, mount), covering at least the last `window_days`.
    /// Order is not guaranteed.
    fn fetch_history(
        &self,
        host: &str,
        mount: &str,
        metric: MetricType,
        window_days: u32,
    ) -> impl Future<Output = anyhow::Result<Vec<Sample>>> + Send;
}

type SeriesKey = (String, String, MetricType);

/// In-memory source, for tests and for callers that already hold the data.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    snapshots: Vec<Snapshot>,
    series: HashMap<SeriesKey, Vec<Sample>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.snapshots.push(snapshot);
        self
    }

    pub fn with_history(
        mut self,
        host: &str,
        mount: &str,
        metric: MetricType,
        samples: Vec<Sample>,
    ) -> Self {
        self.series
            .entry((host.to_string(), normalize_mount(mount), metric))
            .or_default()
            .extend(samples);
        self
    }
}

impl MonitoringSource for MemorySource {
    async fn fetch_snapshots(&self, filter: &SnapshotFilter) -> anyhow::Result<Vec<Snapshot>> {
        Ok(self
            .snapshots
            .iter()
            .filter(|s| filter.matches(&s.host))
            .cloned()
            .collect())
    }

    async fn fetch_history(
        &self,
        host: &str,
        mount: &str,
        metric: MetricType,
        _window_days: u32,
    ) -> anyhow::Result<Vec<Sample>> {
        let key = (host.to_string(), normalize_mount(mount), metric);
        Ok(self.series.get(&key).cloned().unwrap_or_default())
    }
}
