use std::sync::Arc;

use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the process-wide `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Acquisition metrics
    pub fetch_requests: IntCounter,
    pub fetch_failures: IntCounterVec,
    pub fetch_duration: Histogram,

    // Cache metrics
    pub cache_hits: IntCounter,
    pub waiter_timeouts: IntCounter,
    pub invalidations: IntCounter,
    pub clearance_expiry_unix: IntGauge,

    pub up: IntGauge,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("clearanceagent".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            fetch_requests: IntCounter::new("fetch_requests_total", "Total remote acquisition attempts").unwrap(),
            fetch_failures: IntCounterVec::new(Opts::new("fetch_failures_total", "Acquisition failures by reason"), &["reason"]).unwrap(),
            fetch_duration: Histogram::with_opts(HistogramOpts::new("fetch_duration_seconds", "Remote acquisition duration seconds").buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0])).unwrap(),

            cache_hits: IntCounter::new("cache_hits_total", "Clearance served from cache").unwrap(),
            waiter_timeouts: IntCounter::new("waiter_timeouts_total", "Waiters that gave up on an in-flight fetch").unwrap(),
            invalidations: IntCounter::new("invalidations_total", "Explicit cache invalidations").unwrap(),
            clearance_expiry_unix: IntGauge::new("clearance_expiry_unix_seconds", "Cached clearance expiry timestamp").unwrap(),

            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.fetch_requests.clone())).unwrap();
        reg.register(Box::new(metrics.fetch_failures.clone())).unwrap();
        reg.register(Box::new(metrics.fetch_duration.clone())).unwrap();
        reg.register(Box::new(metrics.cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.waiter_timeouts.clone())).unwrap();
        reg.register(Box::new(metrics.invalidations.clone())).unwrap();
        reg.register(Box::new(metrics.clearance_expiry_unix.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
