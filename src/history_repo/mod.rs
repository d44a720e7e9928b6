// SQLite-backed monitoring source. Items are keyed by (host, item key); history rows are
// (itemid, clock, value) with clock in seconds since epoch.

mod schema;

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::instrument;

use crate::forecast::SECONDS_PER_DAY;
use crate::models::{MetricType, Sample, Snapshot, SnapshotFilter, normalize_mount};
use crate::source::MonitoringSource;
use crate::zabbix::{self, ItemRecord};

pub struct HistoryRepo {
    pool: SqlitePool,
    retention_secs: i64,
}

impl HistoryRepo {
    /// Connect to SQLite at `path`, create parent dir and DB if missing, enable WAL + pragmas.
    pub async fn connect(path: &str, max_pool_size: u32, retention_days: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        let retention_secs = i64::from(retention_days) * SECONDS_PER_DAY;
        Ok(Self {
            pool,
            retention_secs,
        })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        schema::init_tables(&self.pool).await
    }

    /// Inserts the item or updates its last value. Returns the item id.
    #[instrument(skip(self), fields(repo = "history", operation = "upsert_item"))]
    pub async fn upsert_item(
        &self,
        host: &str,
        key: &str,
        last_value: Option<f64>,
    ) -> anyhow::Result<i64> {
        let item_id: i64 = sqlx::query_scalar(
            "INSERT INTO items (host, key_, lastvalue) VALUES ($1, $2, $3)
             ON CONFLICT(host, key_) DO UPDATE SET lastvalue = excluded.lastvalue
             RETURNING itemid",
        )
        .bind(host)
        .bind(key)
        .bind(last_value)
        .fetch_one(&self.pool)
        .await?;
        Ok(item_id)
    }

    /// Replaces the trigger priorities attached to an item.
    #[instrument(skip(self, priorities), fields(repo = "history", operation = "set_item_triggers", triggers_count = priorities.len()))]
    pub async fn set_item_triggers(&self, item_id: i64, priorities: &[i64]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM triggers WHERE itemid = $1")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;
        for priority in priorities {
            sqlx::query("INSERT INTO triggers (itemid, priority) VALUES ($1, $2)")
                .bind(item_id)
                .bind(*priority)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(self, samples), fields(repo = "history", operation = "insert_history", samples_count = samples.len()))]
    pub async fn insert_history(&self, item_id: i64, samples: &[Sample]) -> anyhow::Result<()> {
        if samples.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await?;
        for s in samples {
            sqlx::query("INSERT INTO history (itemid, clock, value) VALUES ($1, $2, $3)")
                .bind(item_id)
                .bind(s.timestamp)
                .bind(s.value)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Filesystem size items of hosts matching `filter`, with their trigger priorities.
    #[instrument(skip(self), fields(repo = "history", operation = "get_items"))]
    pub async fn get_items(&self, filter: &SnapshotFilter) -> anyhow::Result<Vec<ItemRecord>> {
        let trigger_rows = sqlx::query("SELECT itemid, priority FROM triggers")
            .fetch_all(&self.pool)
            .await?;
        let mut triggers: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in trigger_rows {
            let item_id: i64 = row.try_get("itemid")?;
            let priority: i64 = row.try_get("priority")?;
            triggers.entry(item_id).or_default().push(priority);
        }

        let rows = sqlx::query(
            "SELECT itemid, host, key_, lastvalue FROM items
             WHERE key_ LIKE 'vfs.fs.size[%' ORDER BY host, key_",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let host: String = row.try_get("host")?;
            if !filter.matches(&host) {
                continue;
            }
            let item_id: i64 = row.try_get("itemid")?;
            out.push(ItemRecord {
                host,
                key: row.try_get("key_")?,
                last_value: row.try_get("lastvalue")?,
                trigger_priorities: triggers.remove(&item_id).unwrap_or_default(),
            });
        }
        Ok(out)
    }

    /// Item id of a filesystem metric. Tries the canonical key on the (host, key_) index first;
    /// stored keys may be quoted or cased differently, so falls back to comparing parsed keys.
    async fn find_item_id(
        &self,
        host: &str,
        mount: &str,
        metric: MetricType,
    ) -> anyhow::Result<Option<i64>> {
        let exact: Option<i64> =
            sqlx::query_scalar("SELECT itemid FROM items WHERE host = $1 AND key_ = $2")
                .bind(host)
                .bind(zabbix::item_key(mount, metric))
                .fetch_optional(&self.pool)
                .await?;
        if exact.is_some() {
            return Ok(exact);
        }

        let mount = normalize_mount(mount);
        let rows = sqlx::query(
            "SELECT itemid, key_ FROM items WHERE host = $1 AND key_ LIKE 'vfs.fs.size[%'",
        )
        .bind(host)
        .fetch_all(&self.pool)
        .await?;
        for row in rows {
            let key: String = row.try_get("key_")?;
            if let Some(parsed) = zabbix::parse_item_key(&key)
                && parsed.mount == mount
                && parsed.metric == metric
            {
                return Ok(Some(row.try_get("itemid")?));
            }
        }
        Ok(None)
    }

    /// History of an item with `clock >= since`, ascending by clock.
    pub async fn get_history_since(&self, item_id: i64, since: i64) -> anyhow::Result<Vec<Sample>> {
        let rows = sqlx::query(
            "SELECT clock, value FROM history WHERE itemid = $1 AND clock >= $2 ORDER BY clock ASC",
        )
        .bind(item_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(Sample::new(row.try_get("clock")?, row.try_get("value")?));
        }
        Ok(out)
    }

    /// Deletes history older than the retention period. Returns the number of rows removed.
    #[instrument(skip(self), fields(repo = "history", operation = "prune_old_history"))]
    pub async fn prune_old_history(&self) -> anyhow::Result<u64> {
        let cutoff = chrono::Utc::now().timestamp() - self.retention_secs;
        let result = sqlx::query("DELETE FROM history WHERE clock < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

impl MonitoringSource for HistoryRepo {
    async fn fetch_snapshots(&self, filter: &SnapshotFilter) -> anyhow::Result<Vec<Snapshot>> {
        let items = self.get_items(filter).await?;
        Ok(zabbix::snapshots_from_items(&items))
    }

    async fn fetch_history(
        &self,
        host: &str,
        mount: &str,
        metric: MetricType,
        window_days: u32,
    ) -> anyhow::Result<Vec<Sample>> {
        let Some(item_id) = self.find_item_id(host, mount, metric).await? else {
            return Ok(Vec::new());
        };
        let since = chrono::Utc::now().timestamp() - i64::from(window_days) * SECONDS_PER_DAY;
        self.get_history_since(item_id, since).await
    }
}
