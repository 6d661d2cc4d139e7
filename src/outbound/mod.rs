//! Integration helpers for request paths that consume the clearance:
//! cookie assembly, the static-value fallback, and the 403 signal hook.

use tracing::{info, warn};

use crate::coordinator::ClearanceCoordinator;

/// Clearance value for an outbound request: the coordinator's when enabled
/// and acquirable, otherwise the statically configured one.
pub async fn ensure_clearance(coordinator: &ClearanceCoordinator) -> Option<String> {
    if coordinator.is_enabled() {
        if let Ok(entry) = coordinator.get(None, false).await {
            return Some(entry.value);
        }
    }
    static_clearance(coordinator)
}

/// Force a fresh acquisition, falling back like [`ensure_clearance`].
pub async fn refresh_clearance(coordinator: &ClearanceCoordinator) -> Option<String> {
    if coordinator.is_enabled() {
        info!("force refreshing clearance");
        if let Ok(entry) = coordinator.get(None, true).await {
            return Some(entry.value);
        }
    }
    static_clearance(coordinator)
}

/// Failure-signal hook: the protected target answered 403, so the cached
/// clearance is known bad and the next `get` must re-acquire.
pub fn handle_forbidden(coordinator: &ClearanceCoordinator) {
    if coordinator.is_enabled() {
        warn!("403 from protected target, invalidating clearance cache");
        coordinator.invalidate();
    }
}

/// Build the SSO cookie string, appending the clearance when one is available.
pub async fn build_sso_cookie(coordinator: &ClearanceCoordinator, sso_token: &str) -> String {
    let sso_token = sso_token.strip_prefix("sso=").unwrap_or(sso_token);
    let mut cookie = format!("sso={sso_token}; sso-rw={sso_token}");

    if let Some(clearance) = ensure_clearance(coordinator).await {
        cookie.push_str(&format!(";cf_clearance={clearance}"));
    }

    cookie
}

fn static_clearance(coordinator: &ClearanceCoordinator) -> Option<String> {
    coordinator
        .config()
        .clearance
        .static_value
        .clone()
        .filter(|value| !value.is_empty())
}
