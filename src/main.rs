use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_catalog::{
    config::{Config, defaults::DEFAULT_CONFIG_FILE},
    services::{CatalogCache, ChannelService},
    sources::HttpPlaylistFetcher,
    web::{AppState, WebServer},
};

#[derive(Parser)]
#[command(name = "m3u-catalog")]
#[command(version)]
#[command(about = "Searchable, categorized channel catalog backed by a remote M3U playlist")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Playlist URL (overrides config file)
    #[arg(short = 'u', long, value_name = "URL")]
    playlist_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = format!("m3u_catalog={0},tower_http={0}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting M3U Catalog Service v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(playlist_url) = cli.playlist_url {
        config.catalog.playlist_url = playlist_url;
        config.validate()?;
    }

    let fetcher = HttpPlaylistFetcher::from_config(&config.catalog)?;
    let catalog = Arc::new(CatalogCache::from_config(
        Arc::new(fetcher),
        &config.catalog,
    ));
    let state = AppState::new(ChannelService::new(catalog));

    let web_server = WebServer::new(&config.web, state)?;
    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
