mod backend;
mod catalog;
mod config;
mod errors;
mod protocol;
mod service;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};
use reqwest::Client;

use crate::backend::ytdlp::YtDlp;
use crate::service::Service;

#[derive(Parser)]
#[command(name = "music-bridge")]
#[command(about = "Music catalog bridge speaking line-delimited JSON over stdio", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the yt-dlp binary
    #[arg(long, env = "MUSIC_BRIDGE_YTDLP")]
    ytdlp_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize logger; env_logger writes to stderr, keeping stdout
    // clean for the response protocol.
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    info!("Starting music bridge service");

    // Load configuration
    let mut config = match config::AppConfig::load_from(cli.config.as_deref()) {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            config::AppConfig::default()
        }
    };
    if let Some(path) = cli.ytdlp_path {
        config.ytdlp_path = Some(path);
    }

    let client = Client::builder()
        .timeout(config.request_timeout())
        .user_agent(config.user_agent.as_str())
        .build()
        .ok();
    if client.is_none() {
        warn!("HTTP client could not be constructed, catalog access disabled");
    }

    let ytdlp = detect_ytdlp(&config);

    let service = Service::new(config, client, ytdlp);
    let capabilities = service.capabilities();
    info!(
        "🚀 [SERVICE] Ready (catalog: {}, extractor: {})",
        capabilities.ytmusic, capabilities.ytdlp
    );

    if let Err(e) = service.run().await {
        error!("Service loop failed: {}", e);
        std::process::exit(1);
    }
}

/// Resolves the yt-dlp binary from config or PATH and checks it runs.
fn detect_ytdlp(config: &config::AppConfig) -> Option<YtDlp> {
    let binary = config
        .ytdlp_path
        .as_ref()
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| "yt-dlp".to_string());

    let ytdlp = YtDlp::new(binary);
    if ytdlp.probe() {
        Some(ytdlp)
    } else {
        warn!("yt-dlp not found, stream extraction disabled");
        None
    }
}
