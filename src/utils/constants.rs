//! Shared constants and invariants

/// Safety margin subtracted from the reported expiry so a credential is never
/// served right before it lapses mid-request.
pub const BUFFER_SECONDS: i64 = 300;

/// Waiter path: number of one-second polls before giving up on an in-flight fetch.
pub const MAX_WAIT_ITERATIONS: u32 = 30;
pub const WAIT_INTERVAL_SECS: u64 = 1;

/// Added on top of the configured upstream timeout for the HTTP client itself.
pub const FETCH_TIMEOUT_MARGIN_SECS: u64 = 10;

pub const DEFAULT_TARGET_URL: &str = "https://grok.com";
pub const DEFAULT_BROWSER: &str = "chrome136";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 120;

// Redaction widths for the admin surface
pub const CLEARANCE_PREVIEW_CHARS: usize = 30;
pub const SERVICE_URL_PREVIEW_CHARS: usize = 50;
