// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::openclaw_service::OpenClawService;
use crate::application::stats_service::StatsService;
use crate::infrastructure::api_proxy::ApiProxy;

/// Shared by the builder server routes.
#[derive(Clone)]
pub struct BuilderState {
    pub dashboard_service: DashboardService,
    pub stats_service: StatsService,
    pub openclaw_service: OpenClawService,
}

/// Shared by the export server routes.
#[derive(Clone)]
pub struct ExportState {
    pub proxy: ApiProxy,
}
