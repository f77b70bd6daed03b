#![allow(non_snake_case)]

use std::env;

use anyhow::{Context, Result};
use interviewScheduler::config::{AppConfig, RunMode, Settings};
use interviewScheduler::runtime;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path)
            .with_context(|| format!("Failed to load {}", path))?,
        Err(_) => AppConfig::default(),
    };
    let settings = Settings::from_config(&config)?;

    match settings.run_mode {
        RunMode::Cli => runtime::run_cli(&settings).await,
        RunMode::Serve => runtime::run_server(&settings).await,
    }
}
