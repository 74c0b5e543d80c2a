#![deny(unsafe_code)]

//! banstat CLI — serves fail2ban statistics over HTTP.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use banstat_config::AppConfig;
use banstat_core::Fail2banClient;
use banstat_core::server::{self, ApiState};

/// banstat — fail2ban statistics over a small HTTP API.
#[derive(Parser)]
#[command(name = "banstat", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "banstat.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve,

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_found) = load_config(&cli.config).await?;

    // Verbosity flags override the configured level; RUST_LOG overrides both.
    let filter = match cli.verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    if !config_found {
        info!(path = %cli.config.display(), "Config file not found, using defaults");
    }

    match cli.command {
        Commands::Serve => cmd_serve(config).await?,
        Commands::Config { show } => cmd_config(&cli.config, &config, show)?,
    }

    Ok(())
}

async fn cmd_serve(config: AppConfig) -> Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        config.server.listen_addr, config.server.listen_port
    )
    .parse()
    .context("invalid server.listen_addr / listen_port")?;

    info!(binary = %config.fail2ban.binary, "Starting banstat API");

    let state = Arc::new(ApiState {
        tool: Arc::new(Fail2banClient::from_config(&config.fail2ban)),
    });
    server::serve(addr, state).await.context("HTTP server failed")?;

    Ok(())
}

fn cmd_config(config_path: &Path, config: &AppConfig, show: bool) -> Result<()> {
    if show {
        let toml_str =
            toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {e}"))?;
        println!("{toml_str}");
    } else {
        println!("Configuration at '{}' is valid.", config_path.display());
    }
    Ok(())
}

/// Load the config file, falling back to defaults when it does not exist.
/// Returns whether the file was found so the caller can log it after the
/// tracing subscriber is up.
async fn load_config(path: &Path) -> Result<(AppConfig, bool)> {
    if path.exists() {
        let config = AppConfig::load(path).await.map_err(|e| anyhow::anyhow!(e))?;
        Ok((config, true))
    } else {
        Ok((AppConfig::default(), false))
    }
}
