use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::cache::entry::{ClearanceContext, ClearanceEntry};
use crate::helpers::time::{format_unix_ts, now_i64};

/// Single cached entry plus the in-flight marker, both behind one guard so no
/// caller observes a torn entry and check-then-fetch races cannot happen.
#[derive(Debug, Default)]
struct CacheState {
    entry: Option<ClearanceEntry>,
    refreshing: bool,
}

/// Serializes all reads and writes of the clearance state. Hold time is O(1);
/// no I/O happens under the guard.
#[derive(Debug, Clone, Default)]
pub struct ClearanceCache {
    inner: Arc<Mutex<CacheState>>,
}

impl ClearanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current entry if it is still valid for `context`, else nothing.
    pub fn get_valid(&self, context: &ClearanceContext) -> Option<ClearanceEntry> {
        let state = self.inner.lock();
        match &state.entry {
            Some(entry) if entry.is_valid_for(context, now_i64()) => {
                debug!(
                    browser = %context.browser,
                    expires_in = entry.expires_at - now_i64(),
                    "clearance cache hit"
                );
                Some(entry.clone())
            }
            _ => None,
        }
    }

    /// Raw current entry regardless of validity. Admin status view only.
    pub fn snapshot(&self) -> Option<ClearanceEntry> {
        self.inner.lock().entry.clone()
    }

    /// Replace the cached entry wholesale.
    pub fn set(&self, entry: ClearanceEntry) {
        let mut state = self.inner.lock();
        info!(
            browser = %entry.context.browser,
            expires_at = %format_unix_ts(entry.expires_at),
            "clearance cached"
        );
        state.entry = Some(entry);
    }

    /// Clear the cached entry. Idempotent.
    pub fn invalidate(&self) {
        let mut state = self.inner.lock();
        state.entry = None;
        info!("clearance cache invalidated");
    }

    pub fn is_refreshing(&self) -> bool {
        self.inner.lock().refreshing
    }

    pub fn set_refreshing(&self, value: bool) {
        self.inner.lock().refreshing = value;
    }

    /// Atomically claim the fetcher role. Only the first caller to observe
    /// `refreshing == false` gets a guard; everyone else sees `None` and must
    /// wait. The flag is cleared when the guard drops, on every exit path.
    pub fn try_begin_refresh(&self) -> Option<RefreshGuard> {
        let mut state = self.inner.lock();
        if state.refreshing {
            return None;
        }
        state.refreshing = true;
        Some(RefreshGuard {
            cache: self.clone(),
        })
    }
}

/// RAII release of the in-flight marker.
#[derive(Debug)]
pub struct RefreshGuard {
    cache: ClearanceCache,
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.cache.set_refreshing(false);
    }
}
