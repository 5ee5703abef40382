//! Janus - entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use janus_config::ConfigLoader;
use tracing::info;

use janus_server::{build_authorizer, connect_key_store, telemetry_config, JanusServer};

/// API Gateway authorizer: verifies bearer tokens against published keys.
#[derive(Debug, Parser)]
#[command(name = "janus", version, about)]
struct Cli {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "JANUS_CONFIG")]
    config: Option<PathBuf>,

    /// Start from development defaults (pretty debug logs, clock leeway)
    #[arg(long)]
    dev: bool,

    /// Prefix for environment overrides
    #[arg(long, default_value = "JANUS")]
    env_prefix: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new().with_dotenv()?;
    loader = if cli.dev {
        loader.with_development()
    } else {
        loader.with_production()
    };
    if let Some(path) = &cli.config {
        loader = loader
            .with_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
    }
    let config = loader.with_env_prefix(&cli.env_prefix).load()?;

    janus_telemetry::init_telemetry(&telemetry_config(&config.telemetry))?;
    info!(version = janus_server::VERSION, "starting janus");

    let keys = connect_key_store(&config)
        .await
        .with_context(|| format!("connecting to key store at {}", config.key_store.url()))?;

    let authorizer = build_authorizer(keys, &config);
    JanusServer::new(config.server.clone(), authorizer).run().await?;

    info!("janus stopped");
    Ok(())
}
