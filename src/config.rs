use serde::Deserialize;

use crate::forecast::{DEFAULT_TOP_RISKY_LIMIT, DEFAULT_WINDOW_DAYS, ForecastOptions};
use crate::models::GrowthAggregation;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    /// History older than this is pruned. Must cover the forecast window.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

fn default_max_pool_size() -> u32 {
    4
}

fn default_retention_days() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_top_risky_limit")]
    pub top_risky_limit: usize,
    /// "mean" (per-filesystem average) or "sum" (fleet-wide rate).
    #[serde(default)]
    pub growth_aggregation: GrowthAggregation,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            top_risky_limit: default_top_risky_limit(),
            growth_aggregation: GrowthAggregation::default(),
        }
    }
}

impl ForecastConfig {
    pub fn options(&self) -> ForecastOptions {
        ForecastOptions {
            window_days: self.window_days,
            top_risky_limit: self.top_risky_limit,
            growth_aggregation: self.growth_aggregation,
        }
    }
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

fn default_top_risky_limit() -> usize {
    DEFAULT_TOP_RISKY_LIMIT
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// Max filesystems whose history is fetched at once per report.
    #[serde(default = "default_history_fetch_concurrency")]
    pub history_fetch_concurrency: usize,
    /// How often the retention worker prunes old history (real seconds).
    #[serde(default = "default_prune_interval_secs")]
    pub prune_interval_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            history_fetch_concurrency: default_history_fetch_concurrency(),
            prune_interval_secs: default_prune_interval_secs(),
        }
    }
}

fn default_history_fetch_concurrency() -> usize {
    8
}

fn default_prune_interval_secs() -> u64 {
    3600
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            self.forecast.window_days > 0,
            "forecast.window_days must be > 0, got {}",
            self.forecast.window_days
        );
        anyhow::ensure!(
            self.database.retention_days >= self.forecast.window_days,
            "database.retention_days ({}) must be >= forecast.window_days ({})",
            self.database.retention_days,
            self.forecast.window_days
        );
        anyhow::ensure!(
            self.forecast.top_risky_limit > 0,
            "forecast.top_risky_limit must be > 0, got {}",
            self.forecast.top_risky_limit
        );
        anyhow::ensure!(
            self.monitoring.history_fetch_concurrency > 0,
            "monitoring.history_fetch_concurrency must be > 0, got {}",
            self.monitoring.history_fetch_concurrency
        );
        anyhow::ensure!(
            self.monitoring.prune_interval_secs > 0,
            "monitoring.prune_interval_secs must be > 0, got {}",
            self.monitoring.prune_interval_secs
        );
        Ok(())
    }
}
