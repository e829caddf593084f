use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use poke_index::command;
use poke_index::config::Config;
use poke_index::provider::PokeApiProvider;
use poke_index::LookupCache;

/// Answer `!poke <name>` lines read from stdin.
#[derive(Debug, Parser)]
#[command(name = "pokeindex", version, about)]
struct Cli {
    /// YAML config file
    #[arg(short, long, env = "POKEINDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Override the refresh interval, e.g. "30m"
    #[arg(long, value_parser = humantime_serde::re::humantime::parse_duration)]
    refresh_interval: Option<Duration>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let mut config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(interval) = cli.refresh_interval {
        config.cache.refresh_interval = interval;
        config.cache.validate()?;
    }

    let provider = Arc::new(PokeApiProvider::new(config.pokeapi.clone()));
    let cache = LookupCache::start(provider, config.cache.clone()).context("Invalid cache config")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                if let Some(reply) = command::respond(&cache, &line) {
                    println!("{reply}");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    cache.shutdown().await;
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    Ok(())
}
