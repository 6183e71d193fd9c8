use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_merge::{
    config::Config,
    merge::{write_playlist, PlaylistMerger},
    overrides::read_overrides,
    sources::HttpPlaylistFetcher,
};

#[derive(Parser)]
#[command(name = "m3u-merge")]
#[command(version = "0.1.0")]
#[command(about = "Fetches remote M3U playlists and merges them into a single output playlist")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Output file path (overrides config file)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("m3u_merge={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting m3u-merge v{}", env!("CARGO_PKG_VERSION"));

    std::env::set_var("CONFIG_FILE", &cli.config);
    let mut config = Config::load()?;
    info!("Configuration loaded from: {}", cli.config);

    if let Some(output) = cli.output {
        config.output.path = output;
    }

    if config.sources.is_empty() {
        tracing::warn!("No sources configured; output will contain overrides only");
    }

    let overrides = read_overrides(&config.overrides.path)?;

    let timeout = config.fetch.timeout_secs.map(Duration::from_secs);
    let fetcher = HttpPlaylistFetcher::new(timeout);

    let merger = PlaylistMerger::new(&fetcher, &config);
    let document = merger.build(&overrides).await?;

    let path = write_playlist(&config.output.path, &document)?;
    info!("Wrote {} bytes to {}", document.len(), path.display());

    Ok(())
}
