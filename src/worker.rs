// Background retention worker: prunes history older than the configured retention period.

use crate::history_repo::HistoryRepo;
use std::sync::Arc;
use tokio::time::{Duration, interval};
use tracing::Instrument;

/// Repo and shutdown for the worker.
pub struct WorkerDeps {
    pub history_repo: Arc<HistoryRepo>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Worker timing config (real seconds).
pub struct WorkerConfig {
    pub prune_interval_secs: u64,
}

/// Spawns the retention loop. The first prune runs immediately; the task exits on shutdown.
pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        history_repo,
        mut shutdown_rx,
    } = deps;
    let prune_interval = Duration::from_secs(config.prune_interval_secs);

    let worker_span = tracing::span!(
        tracing::Level::DEBUG,
        "worker",
        prune_interval_secs = config.prune_interval_secs
    );

    tokio::spawn(
        async move {
            let mut prune_tick = interval(prune_interval);
            prune_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            let mut rows_pruned_total: u64 = 0;

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        tracing::debug!(rows_pruned_total, "Worker shutting down");
                        break;
                    }
                    _ = prune_tick.tick() => {
                        match history_repo.prune_old_history().await {
                            Ok(rows) => {
                                rows_pruned_total += rows;
                                tracing::debug!(
                                    operation = "prune_old_history",
                                    rows_pruned = rows,
                                    "Old history pruned"
                                );
                            }
                            Err(e) => {
                                tracing::warn!(
                                    error = %e,
                                    operation = "prune_old_history",
                                    "Failed to prune old history"
                                );
                            }
                        }
                    }
                }
            }
        }
        .instrument(worker_span),
    )
}
