// Router builders for the builder and export servers
use crate::presentation::app_state::{BuilderState, ExportState};
use crate::presentation::handlers::{
    export_dashboard, get_auth, get_config, get_releases, get_stats, list_widgets, proxy_api,
    save_config, stream_stats,
};
use axum::{Router, extract::DefaultBodyLimit, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Builder API plus the builder UI served from `static_dir`.
pub fn build_builder_router(
    state: Arc<BuilderState>,
    static_dir: &Path,
    max_body_bytes: usize,
) -> Router {
    Router::new()
        .route("/config", get(get_config).post(save_config))
        .route("/api/widgets", get(list_widgets))
        .route("/api/export", axum::routing::post(export_dashboard))
        .route("/api/stats", get(get_stats))
        .route("/api/stats/stream", get(stream_stats))
        .route("/api/auth", get(get_auth))
        .route("/api/releases", get(get_releases))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Exported dashboard files plus the whitelisted `/api/*` proxy.
pub fn build_export_router(state: Arc<ExportState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/api/*path", get(proxy_api))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
