//! Clearance acquisition coordinator.
//!
//! Single entry point (`get`) guaranteeing at most one remote acquisition in
//! flight at a time: cache hits are served directly, one caller claims the
//! fetcher role, and everyone else polls the cache for a bounded window.

pub mod error;
mod fetch;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::cache::{ClearanceCache, ClearanceContext, ClearanceEntry};
use crate::config::settings::ServiceConfig;
use crate::observability::metrics::Metrics;
use crate::utils::constants::{MAX_WAIT_ITERATIONS, WAIT_INTERVAL_SECS};

pub use error::AcquisitionError;

/// Owns the cache, the HTTP client, and the acquisition parameters.
/// Constructed once at the composition root and shared via `Arc`.
pub struct ClearanceCoordinator {
    cache: ClearanceCache,
    client: Client,
    config: ServiceConfig,
    metrics: Arc<Metrics>,
}

impl ClearanceCoordinator {
    pub fn new(config: ServiceConfig, metrics: Arc<Metrics>) -> Self {
        Self {
            cache: ClearanceCache::new(),
            client: Client::new(),
            config,
            metrics,
        }
    }

    /// Whether automatic acquisition is configured at all. Consumers check
    /// this before calling [`get`](Self::get) and fall back to a statically
    /// configured credential when it is false.
    pub fn is_enabled(&self) -> bool {
        self.config
            .clearance
            .service_url
            .as_deref()
            .is_some_and(|url| !url.is_empty())
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn cache(&self) -> &ClearanceCache {
        &self.cache
    }

    /// Context assembled from the configured defaults.
    pub fn default_context(&self) -> ClearanceContext {
        ClearanceContext::new(
            self.config.proxy.browser.clone(),
            self.config.proxy.base_proxy_url.clone(),
        )
    }

    /// Return a clearance for `context` (configured defaults when `None`).
    ///
    /// Serves the cache when it holds a valid entry, waits out an acquisition
    /// another caller already started, or performs the remote fetch itself.
    /// A failed fetch leaves any previously cached entry untouched; only
    /// [`invalidate`](Self::invalidate) or natural expiry removes one.
    pub async fn get(
        &self,
        context: Option<ClearanceContext>,
        force_refresh: bool,
    ) -> Result<ClearanceEntry, AcquisitionError> {
        let context = context.unwrap_or_else(|| self.default_context());

        if !force_refresh {
            if let Some(entry) = self.cache.get_valid(&context) {
                self.metrics.cache_hits.inc();
                return Ok(entry);
            }
        }

        match self.cache.try_begin_refresh() {
            // Someone else is already fetching: poll until it lands.
            None => self.wait_for_refresh(&context).await,
            // This caller is the fetcher. The guard clears the refreshing
            // flag when it drops, on every exit path.
            Some(_guard) => {
                let entry = self.fetch_from_service(&context).await?;
                self.cache.set(entry.clone());
                self.metrics.clearance_expiry_unix.set(entry.expires_at);
                Ok(entry)
            }
        }
    }

    /// Bounded poll for an acquisition already in flight: up to 30 one-second
    /// sleeps, breaking out early once the fetcher finishes either way.
    async fn wait_for_refresh(
        &self,
        context: &ClearanceContext,
    ) -> Result<ClearanceEntry, AcquisitionError> {
        debug!("clearance refresh already in progress, waiting");

        for _ in 0..MAX_WAIT_ITERATIONS {
            sleep(Duration::from_secs(WAIT_INTERVAL_SECS)).await;
            if let Some(entry) = self.cache.get_valid(context) {
                return Ok(entry);
            }
            if !self.cache.is_refreshing() {
                break;
            }
        }

        // The fetch may have landed between the last poll and the flag check.
        if let Some(entry) = self.cache.get_valid(context) {
            return Ok(entry);
        }

        self.metrics.waiter_timeouts.inc();
        warn!("gave up waiting for in-flight clearance refresh");
        Err(AcquisitionError::Timeout)
    }

    /// Drop the cached entry so the next `get` performs a fresh acquisition.
    pub fn invalidate(&self) {
        self.metrics.invalidations.inc();
        self.cache.invalidate();
    }
}
