use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli;
use crate::clients::{HttpSchedulerApi, SchedulerApi};
use crate::config::Settings;
use crate::models::{Schedule, FIXTURE_JSON};
use crate::server::{self, ServerState};

pub async fn run_cli(settings: &Settings) -> Result<()> {
    info!(api_url = %settings.api_url, "Using scheduler API");
    let api = HttpSchedulerApi::new(settings.api_url.clone(), settings.request_timeout)
        .context("Failed to build scheduler API client")?;
    let api: Arc<dyn SchedulerApi> = Arc::new(api);
    cli::cli(api).await
}

pub async fn run_server(settings: &Settings) -> Result<()> {
    let schedule = match &settings.fixtures {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read fixtures {}", path))?;
            Schedule::from_json(&raw).with_context(|| format!("Invalid fixtures {}", path))?
        }
        None => Schedule::from_json(FIXTURE_JSON).context("Invalid built-in fixtures")?,
    };
    server::serve(ServerState::new(schedule), settings.bind).await;
    Ok(())
}
