use serde::Deserialize;

use crate::utils::constants::{DEFAULT_BROWSER, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_TARGET_URL};

/// ================================
/// Service-wide configuration
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServiceConfig {
    #[serde(default)]
    pub clearance: ClearanceConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// Remote challenge-solving service parameters. An absent `service_url`
/// disables automatic acquisition entirely; consumers then fall back to
/// `static_value`.
#[derive(Debug, Deserialize, Clone)]
pub struct ClearanceConfig {
    pub service_url: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_target_url")]
    pub target_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Statically configured clearance used when the service is disabled or
    /// acquisition fails.
    pub static_value: Option<String>,
}

impl Default for ClearanceConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            api_key: None,
            target_url: default_target_url(),
            timeout_secs: default_timeout_secs(),
            static_value: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProxyConfig {
    #[serde(default = "default_browser")]
    pub browser: String,
    pub base_proxy_url: Option<String>,
    pub user_agent: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            browser: default_browser(),
            base_proxy_url: None,
            user_agent: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: String,
    #[serde(default)]
    pub is_enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            path: default_metrics_path(),
            is_enabled: false,
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_target_url() -> String {
    DEFAULT_TARGET_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_browser() -> String {
    DEFAULT_BROWSER.to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8480
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}
