// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::source::MonitoringSource;

pub(crate) struct AppState<S> {
    pub(crate) source: Arc<S>,
    pub(crate) config: AppConfig,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            config: self.config.clone(),
        }
    }
}

pub fn app<S: MonitoringSource + 'static>(source: Arc<S>, config: AppConfig) -> Router {
    let state = AppState { source, config };
    Router::new()
        .route("/", get(|| async { "Disk Analyser" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/disk-analysis", get(http::disk_analysis_handler::<S>)) // GET /api/disk-analysis
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
