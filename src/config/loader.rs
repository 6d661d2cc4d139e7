use std::path::Path;

use anyhow::{Context, Result};

use crate::config::settings::ServiceConfig;

/// Load the YAML service configuration from disk.
pub async fn load_config(path: impl AsRef<Path>) -> Result<ServiceConfig> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    let config: ServiceConfig =
        serde_yaml::from_str(&raw).with_context(|| "Invalid config format")?;
    Ok(config)
}
