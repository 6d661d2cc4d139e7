use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::cache::entry::{ClearanceContext, ClearanceEntry};
use crate::coordinator::error::AcquisitionError;
use crate::coordinator::ClearanceCoordinator;
use crate::utils::constants::FETCH_TIMEOUT_MARGIN_SECS;

#[derive(Debug, Serialize)]
struct CredentialRequest<'a> {
    target_url: &'a str,
    context: RequestContext<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContext<'a> {
    browser: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    proxy: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_agent: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CredentialResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    cf_clearance: Option<String>,
    #[serde(default)]
    user_agent: Option<String>,
    #[serde(default)]
    browser: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    cookie_string: Option<String>,
    #[serde(default)]
    cookies: Option<HashMap<String, String>>,
    #[serde(default)]
    error: Option<String>,
}

impl ClearanceCoordinator {
    /// Single remote acquisition attempt against the configured service.
    ///
    /// Every failure mode is caught here and normalized to
    /// [`AcquisitionError::FetchFailed`]; transport timeouts are logged
    /// distinctly but surface the same way. The cache is never touched.
    pub(crate) async fn fetch_from_service(
        &self,
        context: &ClearanceContext,
    ) -> Result<ClearanceEntry, AcquisitionError> {
        let clearance = &self.config.clearance;
        let service_url = match clearance.service_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => {
                error!("clearance service URL not configured");
                return Err(AcquisitionError::Disabled);
            }
        };

        let timeout = clearance.timeout_secs;
        let payload = CredentialRequest {
            target_url: &clearance.target_url,
            context: RequestContext {
                browser: &context.browser,
                proxy: context.proxy.as_deref(),
                user_agent: self.config.proxy.user_agent.as_deref(),
                timeout: Some(timeout),
            },
        };

        let full_url = format!("{}/api/v1/credentials", service_url.trim_end_matches('/'));
        info!(url = %full_url, browser = %context.browser, "requesting clearance from remote service");

        self.metrics.fetch_requests.inc();
        let timer = self.metrics.fetch_duration.start_timer();

        let mut request = self
            .client
            .post(&full_url)
            .timeout(Duration::from_secs(timeout + FETCH_TIMEOUT_MARGIN_SECS))
            .json(&payload);
        if let Some(api_key) = clearance.api_key.as_deref() {
            request = request.header("X-API-Key", api_key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                timer.observe_duration();
                self.metrics.fetch_failures.with_label_values(&["timeout"]).inc();
                error!(timeout, "clearance service request timed out");
                return Err(AcquisitionError::FetchFailed);
            }
            Err(err) => {
                timer.observe_duration();
                self.metrics.fetch_failures.with_label_values(&["transport"]).inc();
                error!(error = %err, "failed to reach clearance service");
                return Err(AcquisitionError::FetchFailed);
            }
        };

        let status = response.status();
        info!(status = %status, "clearance service responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(500).collect();
            timer.observe_duration();
            self.metrics.fetch_failures.with_label_values(&["status"]).inc();
            error!(status = %status, body = %preview, "clearance service returned an error status");
            return Err(AcquisitionError::FetchFailed);
        }

        let data: CredentialResponse = match response.json().await {
            Ok(data) => data,
            Err(err) => {
                timer.observe_duration();
                self.metrics.fetch_failures.with_label_values(&["malformed"]).inc();
                error!(error = %err, "clearance service returned a malformed body");
                return Err(AcquisitionError::FetchFailed);
            }
        };
        timer.observe_duration();

        if !data.success {
            let reason = data.error.as_deref().unwrap_or("Unknown error");
            self.metrics.fetch_failures.with_label_values(&["rejected"]).inc();
            error!(reason, "clearance service reported failure");
            return Err(AcquisitionError::FetchFailed);
        }

        let value = data.cf_clearance.unwrap_or_default();
        if value.is_empty() {
            self.metrics.fetch_failures.with_label_values(&["malformed"]).inc();
            error!("clearance service reported success without a credential");
            return Err(AcquisitionError::FetchFailed);
        }

        if let Some(browser) = data.browser.as_deref() {
            if browser != context.browser {
                debug!(requested = %context.browser, returned = %browser, "service echoed a different browser tag");
            }
        }

        // The entry is keyed by the context it was requested under, not by
        // whatever tag the service echoes back.
        let entry = ClearanceEntry {
            value,
            user_agent: data.user_agent.unwrap_or_default(),
            context: context.clone(),
            expires_at: data.expires_at.unwrap_or(0),
            cookie_string: data.cookie_string,
            cookies: data.cookies,
        };

        info!(
            browser = %entry.context.browser,
            clearance_preview = %entry.value.chars().take(20).collect::<String>(),
            expires_at = entry.expires_at,
            "clearance obtained successfully"
        );
        debug!(has_cookie_string = entry.cookie_string.is_some(), "clearance auxiliary artifacts");

        Ok(entry)
    }
}
