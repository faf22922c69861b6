use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tvmux::{Config, Provider};

#[derive(Parser)]
#[command(name = "tvmux")]
#[command(version)]
#[command(about = "Aggregates an IPTV playlist and XMLTV guide into a reconciled republication")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Playlist source (overrides config file)
    #[arg(long, value_name = "URL_OR_PATH")]
    playlist_url: Option<String>,

    /// EPG source (overrides config file)
    #[arg(long, value_name = "URL_OR_PATH")]
    epg_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = format!("tvmux={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tvmux v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_or_create(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config.display());

    // Override config with CLI arguments
    if let Some(playlist_url) = cli.playlist_url {
        config.source.playlist_url = playlist_url;
    }
    if let Some(epg_url) = cli.epg_url {
        config.source.epg_url = epg_url;
    }

    let provider = Provider::from_config(&config)?;
    let stats = provider.refresh().await?;
    info!(
        "Refresh complete: {} channels, {} programmes kept",
        stats.kept_channels, stats.kept_programmes
    );

    let snapshot = provider
        .snapshot()
        .ok_or_else(|| anyhow::anyhow!("refresh succeeded but no snapshot was published"))?;

    write_output(&config.output.playlist_path, &snapshot.playlist)?;
    info!("Wrote playlist to {}", config.output.playlist_path.display());

    write_output(&config.output.epg_path, &snapshot.epg_xml)?;
    info!("Wrote EPG to {}", config.output.epg_path.display());

    Ok(())
}

fn write_output(path: &std::path::Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)?;
    Ok(())
}
