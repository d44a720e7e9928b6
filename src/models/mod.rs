// Domain models: inbound samples/snapshots and outbound reports

mod report;
mod sample;
mod snapshot;

pub use report::{
    FilesystemReport, GrowthAggregation, Projection, RiskBucket, Severity, Suggestion, SummaryReport,
};
pub use sample::{MetricType, Sample};
pub use snapshot::{Snapshot, SnapshotFilter, normalize_mount};
