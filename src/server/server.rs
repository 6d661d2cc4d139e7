use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tracing::info;

use crate::api::ClearanceApiState;
use crate::config::settings::SettingsConfig;
use crate::coordinator::ClearanceCoordinator;
use crate::observability::metrics::get_metrics;
use crate::observability::routes::MetricsState;

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
    pub clearance_api: ClearanceApiState,
}

impl AppState {
    pub async fn new(coordinator: Arc<ClearanceCoordinator>) -> Self {
        let metrics = get_metrics().await;
        Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
            clearance_api: ClearanceApiState::new(coordinator),
        }
    }
}

/// Build the admin router: clearance management plus the metrics exposition.
pub fn build_router(state: &AppState, settings: &SettingsConfig) -> Router<AppState> {
    Router::new()
        .merge(state.clearance_api.router())
        .merge(state.metrics_state.router(&settings.metrics))
}

/// Start one Axum server carrying the admin API and metrics routes.
pub async fn start(
    settings_config: &SettingsConfig,
    coordinator: Arc<ClearanceCoordinator>,
) -> Result<()> {
    let metrics = get_metrics().await;
    let state = AppState::new(coordinator).await;

    let app = build_router(&state, settings_config).with_state(state);

    let bind_addr = &settings_config.server.host;
    let port = settings_config.server.port;
    info!(address = %bind_addr, port, "starting admin server");

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind_addr, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", bind_addr, port))?;
    metrics.up.set(1);
    axum::serve(listener, app)
        .await
        .context("Admin server failed")?;

    Ok(())
}
