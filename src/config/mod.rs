pub mod loader;
pub mod settings;

pub use settings::{
    ClearanceConfig, LogFormat, LoggingConfig, MetricsConfig, ProxyConfig, ServerConfig,
    ServiceConfig, SettingsConfig,
};
