use chrono::{DateTime, Utc};

pub fn now_i64() -> i64 {
    Utc::now().timestamp()
}

/// Human-readable expiry for log lines, e.g. "2026-08-30 14:03:21".
pub fn format_unix_ts(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ts.to_string())
}
