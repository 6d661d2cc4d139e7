// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::Client;

use crate::api::ClearanceApiState;
use crate::cache::{ClearanceContext, ClearanceEntry};
use crate::config::settings::{ServiceConfig, SettingsConfig};
use crate::coordinator::ClearanceCoordinator;
use crate::helpers::time::now_i64;
use crate::observability::metrics::Metrics;
use crate::observability::routes::MetricsState;
use crate::server::server::{build_router, AppState};

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Spawn the admin server around `coordinator` with an isolated registry.
pub async fn spawn_admin(
    coordinator: Arc<ClearanceCoordinator>,
    settings: &SettingsConfig,
) -> (JoinHandle<()>, SocketAddr) {
    let state = AppState {
        metrics_state: MetricsState::new(Metrics::new().registry.clone()),
        clearance_api: ClearanceApiState::new(coordinator),
    };
    let router = build_router(&state, settings).with_state(state);
    spawn_axum(router).await
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Config with short upstream timeouts suitable for tests.
pub fn test_config(service_url: Option<String>) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.clearance.service_url = service_url;
    config.clearance.timeout_secs = 5;
    config
}

pub fn build_coordinator(service_url: Option<String>) -> ClearanceCoordinator {
    ClearanceCoordinator::new(test_config(service_url), Metrics::new())
}

/// Entry expiring `ttl_secs` from now. Anything above the 300s buffer is valid.
pub fn make_entry(
    browser: &str,
    proxy: Option<&str>,
    value: &str,
    ttl_secs: i64,
) -> ClearanceEntry {
    ClearanceEntry {
        value: value.to_string(),
        user_agent: "test-agent".to_string(),
        context: ClearanceContext::new(browser, proxy.map(String::from)),
        expires_at: now_i64() + ttl_secs,
        cookie_string: None,
        cookies: None,
    }
}
