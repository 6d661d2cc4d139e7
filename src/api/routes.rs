use std::sync::Arc;

use axum::routing::{get, post};
use axum::{extract::State, response::IntoResponse, Json, Router};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coordinator::ClearanceCoordinator;
use crate::server::server::AppState;
use crate::utils::constants::{CLEARANCE_PREVIEW_CHARS, SERVICE_URL_PREVIEW_CHARS};

#[derive(Clone)]
pub struct ClearanceApiState {
    pub coordinator: Arc<ClearanceCoordinator>,
}

impl ClearanceApiState {
    pub fn new(coordinator: Arc<ClearanceCoordinator>) -> Self {
        Self { coordinator }
    }

    pub fn router(&self) -> Router<AppState> {
        Router::new()
            .route("/cf-clearance/status", get(get_status))
            .route("/cf-clearance/refresh", post(refresh))
            .route("/cf-clearance/invalidate", post(invalidate))
    }
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    enabled: bool,
    service_url: Option<String>,
    has_cache: bool,
    cached_clearance: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RefreshRequest {
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct RefreshResponse {
    success: bool,
    cf_clearance: Option<String>,
    message: String,
}

/// Everything this surface returns is redacted to short previews; the full
/// secret never leaves the process through the admin API.
async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let coordinator = &state.clearance_api.coordinator;

    let service_url = coordinator
        .config()
        .clearance
        .service_url
        .as_deref()
        .map(|url| preview(url, SERVICE_URL_PREVIEW_CHARS));
    let cached = coordinator.cache().snapshot();

    Json(StatusResponse {
        enabled: coordinator.is_enabled(),
        service_url,
        has_cache: cached.is_some(),
        cached_clearance: cached
            .filter(|entry| !entry.value.is_empty())
            .map(|entry| preview(&entry.value, CLEARANCE_PREVIEW_CHARS)),
    })
}

async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> impl IntoResponse {
    let coordinator = &state.clearance_api.coordinator;

    if !coordinator.is_enabled() {
        return (
            StatusCode::BAD_REQUEST,
            Json(RefreshResponse {
                success: false,
                cf_clearance: None,
                message: "Clearance service not configured".to_string(),
            }),
        );
    }

    info!(force = request.force, "manual clearance refresh requested");

    if request.force {
        coordinator.invalidate();
    }

    match coordinator.get(None, request.force).await {
        Ok(entry) => (
            StatusCode::OK,
            Json(RefreshResponse {
                success: true,
                cf_clearance: Some(preview(&entry.value, CLEARANCE_PREVIEW_CHARS)),
                message: "Clearance refreshed successfully".to_string(),
            }),
        ),
        Err(err) => (
            StatusCode::OK,
            Json(RefreshResponse {
                success: false,
                cf_clearance: None,
                message: format!("Failed to refresh clearance: {err}"),
            }),
        ),
    }
}

async fn invalidate(State(state): State<AppState>) -> impl IntoResponse {
    state.clearance_api.coordinator.invalidate();

    Json(serde_json::json!({
        "success": true,
        "message": "Clearance cache invalidated"
    }))
}

fn preview(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        let truncated: String = value.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        value.to_string()
    }
}
