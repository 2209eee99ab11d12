//! Creator Studio: creator campaign services.
//!
//! Main entry point: loads configuration, applies CLI overrides and serves
//! the HTTP API.

use clap::Parser;
use creator_api::ApiServer;
use creator_core::config::AppConfig;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "creator-studio")]
#[command(about = "Creator campaign services: AI campaign planning API")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "CREATOR_STUDIO__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "CREATOR_STUDIO__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Upstream AI gateway base URL (overrides config)
    #[arg(long, env = "CREATOR_STUDIO__PLANNER__BASE_URL")]
    planner_url: Option<String>,

    /// Expose Prometheus metrics on the configured metrics port
    #[arg(long, default_value_t = false)]
    metrics: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "creator_studio=info,creator_api=info,creator_planner=info,tower_http=info".into()
            }),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Creator Studio starting up");

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(url) = cli.planner_url {
        config.planner.base_url = url;
    }
    if cli.metrics {
        config.metrics.enabled = true;
    }
    config.validate()?;

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        planner_model = %config.planner.model,
        planner_key_configured = config.planner.api_key.is_some(),
        "Configuration loaded"
    );

    let api_server = ApiServer::new(config.clone());

    if config.metrics.enabled {
        if let Err(e) = api_server.start_metrics().await {
            error!(error = %e, "Failed to start metrics exporter");
        }
    }

    info!("Creator Studio is ready to serve traffic");

    api_server.start_http().await?;

    Ok(())
}
