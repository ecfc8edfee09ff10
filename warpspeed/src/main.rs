mod app;
mod config;
mod engine;
mod input;
mod simulation;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::WarpApp;
use clap::Parser;
use config::{AppConfig, FileConfig, window_conf};
use tracing::{error, info};

/// Command-line arguments for WarpSpeed.
#[derive(Parser)]
#[command(name = "WarpSpeed", version, about = "Time warp controls demo")]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the extended warp ladder (up to 100,000,000x).
    #[arg(long)]
    extended_warp: bool,
}

/// Loads the configuration from a TOML file or uses defaults.
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<FileConfig> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            let config: FileConfig = toml::from_str(&content)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            info!("Loaded config from '{}'", path.display());
            Ok(config)
        }
        None => {
            info!("No config file provided, using defaults.");
            Ok(FileConfig::default())
        }
    }
}

/// Main entry point for the WarpSpeed application.
#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let app_config =
        load_config(cli.config.as_ref()).and_then(|file| AppConfig::from_cli_and_config(&cli, file));

    match app_config {
        Ok(app_config) => {
            let mut app = WarpApp::new(app_config);
            app.run().await;
        }
        Err(e) => {
            error!("Error loading config: {:#}", e);
        }
    }
}
