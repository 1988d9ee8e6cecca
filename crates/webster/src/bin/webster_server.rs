//! Webster REST Server
//!
//! HTTP API for definitions, word lists and the unknown-word ledger.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use webster::config::{Config, StorageConfig};
use webster::server::services::ledger::AvoidListStrategy;
use webster::server::startup::start_server;

#[derive(Parser)]
#[command(name = "webster_server")]
#[command(about = "Webster dictionary REST API server")]
#[command(version)]
struct Args {
  /// Server bind address (overrides the config file)
  #[arg(long)]
  bind: Option<SocketAddr>,

  /// Configuration file
  #[arg(short, long, env = "WEBSTER_CONFIG")]
  config: Option<PathBuf>,

  /// Which unknown words reach the prompt
  #[arg(long, value_enum)]
  strategy: Option<AvoidListStrategy>,

  /// Keep the unknown-word ledger in memory only
  #[arg(long)]
  memory: bool,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if args.verbose {
      EnvFilter::new("info")
    } else {
      EnvFilter::new("webster=info,warn")
    }
  });

  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  let mut config = Config::load(args.config.as_deref())?;
  if let Some(bind) = args.bind {
    config.bind = bind;
  }
  if let Some(strategy) = args.strategy {
    config.avoid_list_strategy = strategy;
  }
  if args.memory {
    config.storage = StorageConfig::Memory;
  }

  tracing::info!("Starting Webster server v{}", env!("CARGO_PKG_VERSION"));
  tracing::info!("Binding to address: {}", config.bind);

  start_server(config).await
}
