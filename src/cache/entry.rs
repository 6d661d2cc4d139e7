use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::utils::constants::BUFFER_SECONDS;

/// Acquisition parameters that scope cache validity. A clearance obtained for
/// one browser/proxy pair is never reused for another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClearanceContext {
    pub browser: String,
    pub proxy: Option<String>,
}

impl ClearanceContext {
    pub fn new(browser: impl Into<String>, proxy: Option<String>) -> Self {
        Self {
            browser: browser.into(),
            // an empty proxy string means "no proxy"
            proxy: proxy.filter(|p| !p.is_empty()),
        }
    }
}

/// Cached clearance credential as returned by the remote challenge-solving
/// service, plus the context it was obtained under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearanceEntry {
    pub value: String,
    pub user_agent: String,
    pub context: ClearanceContext,
    /// Absolute expiry (UNIX seconds) reported upstream. Zero means unknown
    /// and is treated as already expired.
    pub expires_at: i64,
    pub cookie_string: Option<String>,
    pub cookies: Option<HashMap<String, String>>,
}

impl ClearanceEntry {
    pub fn is_expired(&self, now: i64) -> bool {
        if self.expires_at <= 0 {
            return true;
        }
        now >= self.expires_at - BUFFER_SECONDS
    }

    pub fn is_valid_for(&self, context: &ClearanceContext, now: i64) -> bool {
        !self.is_expired(now) && self.context == *context
    }
}
