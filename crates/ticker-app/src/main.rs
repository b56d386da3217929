//! Streaming quote ticker - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Streaming quote ticker
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via TICKER_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config path: CLI arg > TICKER_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("TICKER_CONFIG").ok())
        .unwrap_or_else(|| ticker_app::DEFAULT_CONFIG_PATH.to_string());

    // Loaded first: the log filter comes from it.
    let config = ticker_app::AppConfig::from_file(&config_path)?;

    ticker_telemetry::init_logging(&config.telemetry.log_filter)?;

    info!("Starting ticker v{}", env!("CARGO_PKG_VERSION"));
    info!(
        config_path = %config_path,
        url = %config.websocket.url,
        instruments = ?config.instruments,
        history_capacity = config.history_capacity,
        dashboard = config.dashboard.enabled,
        "Configuration loaded"
    );

    let app = ticker_app::Application::new(config)?;
    app.run().await?;

    Ok(())
}
