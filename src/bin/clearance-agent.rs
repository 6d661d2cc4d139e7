use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use clearance_agent::config::loader::load_config;
use clearance_agent::coordinator::ClearanceCoordinator;
use clearance_agent::observability::metrics::get_metrics;
use clearance_agent::server;
use clearance_agent::utils::logging::{self, LogLevel};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "clearance-agent.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config, init logging
    // -------------------------------

    let args = Args::parse();
    let service_config = load_config(&args.config).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Build the coordinator (composition root, no globals)
    // -------------------------------

    let metrics = get_metrics().await.clone();
    let coordinator = Arc::new(ClearanceCoordinator::new(service_config.clone(), metrics));

    if coordinator.is_enabled() {
        info!("clearance service configured, automatic acquisition enabled");
    } else {
        info!("clearance service not configured, serving static value only");
    }

    // -------------------------------
    // 3. Start the admin/metrics server
    // -------------------------------

    info!("Service starting...");
    server::server::start(&service_config.settings, coordinator).await?;

    Ok(())
}
