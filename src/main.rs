//! llm-devhost
//!
//! Local development host for browser front-ends talking to locally running
//! model backends.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  DEV HOST                     │
//!   Browser request    │  ┌─────────┐    ┌──────────┐                  │
//!   ───────────────────┼─▶│  http   │───▶│ routing  │                  │
//!                      │  │ server  │    │ classify │                  │
//!                      │  └─────────┘    └────┬─────┘                  │
//!                      │        ┌─────────────┼──────────────┐         │
//!                      │        ▼             ▼              ▼         │
//!                      │  ┌──────────┐  ┌───────────┐  ┌───────────┐   │
//!                      │  │  static  │  │   store   │  │   proxy   │───┼──▶ ollama
//!                      │  │  files   │  │ env/tmpl  │  │   relay   │───┼──▶ lmstudio
//!                      │  └──────────┘  └───────────┘  └───────────┘   │
//!                      │                                               │
//!                      │  config · observability · lifecycle · net     │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use llm_devhost::config::{load_config, validate_config, ConfigError, HostConfig};
use llm_devhost::lifecycle::startup;
use llm_devhost::observability::logging;

#[derive(Parser)]
#[command(name = "llm-devhost")]
#[command(about = "Static files, template storage and a relay to local model backends", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. 127.0.0.1:3000).
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the static document root.
    #[arg(short, long)]
    root: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HostConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(root) = cli.root {
        config.storage.document_root = root;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability);

    tracing::info!("llm-devhost v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
