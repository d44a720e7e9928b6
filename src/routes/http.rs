// GET handlers: version, disk analysis

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use super::AppState;
use crate::analysis;
use crate::forecast::{DEFAULT_PRECISION, format_bytes};
use crate::models::SnapshotFilter;
use crate::source::MonitoringSource;
use crate::view::ReportView;

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct AnalysisQuery {
    /// Case-insensitive host name substring.
    host: Option<String>,
    /// Comma-separated exact host names.
    hosts: Option<String>,
}

impl AnalysisQuery {
    fn filter(self) -> SnapshotFilter {
        let hosts = self
            .hosts
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(String::from)
            .collect();
        SnapshotFilter {
            hosts,
            host: self.host,
        }
    }
}

/// GET /api/disk-analysis: per-filesystem forecasts and the fleet summary.
pub(super) async fn disk_analysis_handler<S: MonitoringSource + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<AnalysisQuery>,
) -> impl IntoResponse {
    let filter = query.filter();
    let options = state.config.forecast.options();
    let concurrency = state.config.monitoring.history_fetch_concurrency;
    match analysis::run_report(state.source.as_ref(), &filter, &options, concurrency).await {
        Ok(report) => {
            let view = ReportView::render(&report, |bytes| format_bytes(bytes, DEFAULT_PRECISION));
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Disk analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
