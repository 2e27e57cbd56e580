// HTTP request handlers
use crate::application::config_repository::StoreError;
use crate::domain::stats::SystemStats;
use crate::infrastructure::api_proxy::{ProxyError, request_id};
use crate::infrastructure::http_response::{
    accepts_brotli, error_response, json_response, success_response,
};
use crate::presentation::app_state::{BuilderState, ExportState};
use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, HeaderValue, Response, StatusCode, Uri, header},
    response::{
        IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::{StreamExt, stream};
use std::convert::Infallible;
use std::sync::Arc;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn store_error_response(e: &StoreError) -> Response<Body> {
    match e {
        StoreError::TooLarge { .. } => error_response(StatusCode::PAYLOAD_TOO_LARGE, &e.to_string()),
        StoreError::Invalid(_) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
        StoreError::Io(_) => {
            tracing::error!("Config store failure: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to access config")
        }
    }
}

/// GET /config
pub async fn get_config(State(state): State<Arc<BuilderState>>) -> Response<Body> {
    match state.dashboard_service.load_config().await {
        Ok(config) => Json(config).into_response(),
        Err(e) => store_error_response(&e),
    }
}

/// POST /config
pub async fn save_config(State(state): State<Arc<BuilderState>>, body: Bytes) -> Response<Body> {
    match state.dashboard_service.save_config(&body).await {
        Ok(_) => success_response("Config saved"),
        Err(e) => store_error_response(&e),
    }
}

/// GET /api/widgets - builder palette grouped by category
pub async fn list_widgets(State(state): State<Arc<BuilderState>>) -> impl IntoResponse {
    Json(state.dashboard_service.catalog())
}

/// POST /api/export
pub async fn export_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<BuilderState>>,
    body: Bytes,
) -> Response<Body> {
    match state.dashboard_service.export(&body).await {
        Ok(output) => json_response(&output, accepts_brotli(&headers)).await,
        Err(e) => store_error_response(&e),
    }
}

/// GET /api/stats
pub async fn get_stats(State(state): State<Arc<BuilderState>>) -> impl IntoResponse {
    Json(state.stats_service.snapshot().await)
}

fn stats_event(stats: &SystemStats) -> Option<Event> {
    match Event::default().json_data(stats) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!("Failed to encode stats event: {}", e);
            None
        }
    }
}

/// GET /api/stats/stream - server-sent events, current snapshot first
pub async fn stream_stats(State(state): State<Arc<BuilderState>>) -> Response<Body> {
    let Some(subscription) = state.stats_service.subscribe() else {
        tracing::warn!("Rejected stats stream: client limit reached");
        return error_response(StatusCode::TOO_MANY_REQUESTS, "Too many connections");
    };
    let initial = state.stats_service.snapshot().await;

    let events = stream::once(async move { initial })
        .chain(subscription.into_stream())
        .filter_map(|stats| async move { stats_event(&stats).map(Ok::<Event, Infallible>) });

    Sse::new(events).keep_alive(KeepAlive::default()).into_response()
}

/// GET /api/auth - primary OpenClaw auth profile
pub async fn get_auth(State(state): State<Arc<BuilderState>>) -> Response<Body> {
    match state.openclaw_service.auth_status().await {
        Ok(status) => Json(status).into_response(),
        Err(e) => {
            tracing::warn!("Auth status lookup failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Auth status error: {}", e),
            )
        }
    }
}

/// GET /api/releases - installed vs latest OpenClaw release
pub async fn get_releases(State(state): State<Arc<BuilderState>>) -> Response<Body> {
    match state.openclaw_service.releases().await {
        Ok(info) => Json(info).into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Release check error: {}", e),
        ),
    }
}

/// GET /api/* on the export server
pub async fn proxy_api(State(state): State<Arc<ExportState>>, uri: Uri) -> Response<Body> {
    let request_id = request_id();
    let mut response = match state.proxy.forward(uri.path(), &request_id).await {
        Ok(proxied) => {
            let status = StatusCode::from_u16(proxied.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let mut response = (status, proxied.body).into_response();
            if let Ok(content_type) = HeaderValue::from_str(&proxied.content_type) {
                response.headers_mut().insert(header::CONTENT_TYPE, content_type);
            }
            response
        }
        Err(e @ ProxyError::NotAllowed) => error_response(StatusCode::FORBIDDEN, &e.to_string()),
        Err(e @ ProxyError::Upstream(_)) => error_response(StatusCode::BAD_GATEWAY, &e.to_string()),
    };

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
