// Zabbix item adapter: filesystem item keys like `vfs.fs.size[/var,pused]` become structured
// (host, mount, metric) triples, and item records become snapshots.
// All key-format knowledge stays in this module.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{MetricType, Snapshot, normalize_mount};

/// Base key of the filesystem size item.
pub const FS_SIZE_KEY: &str = "vfs.fs.size";

/// Parsed `vfs.fs.size[<mount>,<mode>]` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemKey {
    pub mount: String,
    pub metric: MetricType,
}

/// Parses a filesystem size item key. Case-insensitive on the key name and mode.
/// Quoted and empty mounts are normalized (`vfs.fs.size[,total]` is `/`).
/// Returns `None` for any other key or unknown mode.
pub fn parse_item_key(key: &str) -> Option<ItemKey> {
    let key = key.trim();
    let prefix_len = FS_SIZE_KEY.len() + 1;
    let prefix = key.get(..prefix_len)?;
    if !prefix.eq_ignore_ascii_case("vfs.fs.size[") {
        return None;
    }
    let params = key[prefix_len..].strip_suffix(']')?;
    let (mount, mode) = params.rsplit_once(',')?;
    let metric = MetricType::from_mode(mode.trim().trim_matches('"'))?;
    Some(ItemKey {
        mount: normalize_mount(mount),
        metric,
    })
}

/// Builds the item key for a metric of a mount. Mounts containing separators are quoted.
pub fn item_key(mount: &str, metric: MetricType) -> String {
    let mount = normalize_mount(mount);
    if mount.contains([',', ']', '[', ' ']) {
        format!("{}[\"{}\",{}]", FS_SIZE_KEY, mount, metric)
    } else {
        format!("{}[{},{}]", FS_SIZE_KEY, mount, metric)
    }
}

/// Trigger severity buckets counted per filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSeverity {
    Warning,
    Critical,
}

impl TriggerSeverity {
    /// Priorities 4 (high) and 5 (disaster) are critical, 2 (warning) and 3 (average) are warnings.
    /// Information and not-classified triggers are not counted.
    pub fn from_priority(priority: i64) -> Option<Self> {
        match priority {
            4 | 5 => Some(TriggerSeverity::Critical),
            2 | 3 => Some(TriggerSeverity::Warning),
            _ => None,
        }
    }
}

/// One monitored item as returned by the monitoring system.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub host: String,
    pub key: String,
    pub last_value: Option<f64>,
    pub trigger_priorities: Vec<i64>,
}

#[derive(Default)]
struct FsItems {
    total: Option<f64>,
    used: Option<f64>,
    free: Option<f64>,
    pused: Option<f64>,
    pfree: Option<f64>,
    critical: u32,
    warning: u32,
}

/// Groups item records per (host, mount) into snapshots, ordered by host then mount.
///
/// Records with unparseable keys are skipped. A filesystem without a total item is skipped.
/// Used bytes come from `used`, else `total - free`; the percentage from `pused`, else
/// `100 - pfree`. Triggers of every item of the filesystem are counted.
pub fn snapshots_from_items(items: &[ItemRecord]) -> Vec<Snapshot> {
    let mut grouped: BTreeMap<(String, String), FsItems> = BTreeMap::new();

    for item in items {
        let Some(parsed) = parse_item_key(&item.key) else {
            debug!(host = %item.host, key = %item.key, "Skipping unrecognised item key");
            continue;
        };
        let fs = grouped
            .entry((item.host.clone(), parsed.mount))
            .or_default();
        let value = item.last_value.filter(|v| v.is_finite());
        match parsed.metric {
            MetricType::Total => fs.total = value,
            MetricType::Used => fs.used = value,
            MetricType::Free => fs.free = value,
            MetricType::PercentUsed => fs.pused = value,
            MetricType::PercentFree => fs.pfree = value,
        }
        for priority in &item.trigger_priorities {
            match TriggerSeverity::from_priority(*priority) {
                Some(TriggerSeverity::Critical) => fs.critical += 1,
                Some(TriggerSeverity::Warning) => fs.warning += 1,
                None => {}
            }
        }
    }

    let mut out = Vec::with_capacity(grouped.len());
    for ((host, mount), fs) in grouped {
        let Some(total) = fs.total else {
            debug!(%host, %mount, "Skipping filesystem without a total item");
            continue;
        };
        out.push(Snapshot {
            host,
            mount,
            total_bytes: total,
            used_bytes: fs.used.or(fs.free.map(|free| total - free)),
            percent_used: fs.pused.or(fs.pfree.map(|pfree| 100.0 - pfree)),
            critical_trigger_count: fs.critical,
            warning_trigger_count: fs.warning,
        });
    }
    out
}
