//! Stockpile collector - Entry Point
//!
//! Accumulates one batch of trading records (a JSON batch descriptor) into
//! the configured object store. The upstream queue consumer invokes this
//! once per delivered message.

use anyhow::Result;
use clap::Parser;
use stockpile_collector::{handle_batch, BatchDescriptor, CollectorConfig};
use stockpile_dataset::DatasetAccumulator;
use tracing::info;

/// Stockpile trading dataset collector
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via STOCKPILE_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Path to a batch descriptor JSON file
    #[arg(short, long)]
    message: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    stockpile_telemetry::init_logging()?;

    info!("Starting stockpile collector v{}", env!("CARGO_PKG_VERSION"));

    // Determine config path: CLI arg > STOCKPILE_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("STOCKPILE_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = CollectorConfig::load_or_default(&config_path)?;

    let store = config.store.build()?;
    let accumulator = DatasetAccumulator::with_threshold(store, config.rotation_threshold_bytes);

    let raw = std::fs::read_to_string(&args.message)?;
    let descriptor: BatchDescriptor = serde_json::from_str(&raw)?;

    let result = handle_batch(&accumulator, &descriptor).await?;
    match result.key() {
        Some(key) => info!(key = %key, size_bytes = result.size_bytes(), "done"),
        None => info!("done, nothing to write"),
    }

    Ok(())
}
