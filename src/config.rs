use std::collections::HashMap;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_RUN_MODE: &str = "cli";
pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_BIND: &str = "127.0.0.1:8001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::InvalidLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// File value first, then the process environment.
    pub fn prop(&self, key: &str) -> Option<String> {
        self.get(key).or_else(|| env::var(key).ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Cli,
    Serve,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub run_mode: RunMode,
    pub api_url: String,
    pub bind: SocketAddr,
    pub fixtures: Option<String>,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let run_mode = match config
            .prop("RUN_MODE")
            .unwrap_or(DEFAULT_RUN_MODE.to_string())
            .as_str()
        {
            "cli" => RunMode::Cli,
            "serve" => RunMode::Serve,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "RUN_MODE".to_string(),
                    value: other.to_string(),
                });
            }
        };
        let bind_raw = config.prop("SCHEDULER_BIND").unwrap_or(DEFAULT_BIND.to_string());
        let bind = bind_raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: "SCHEDULER_BIND".to_string(),
            value: bind_raw.clone(),
        })?;
        let request_timeout = match config.prop("SCHEDULER_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidValue {
                    key: "SCHEDULER_TIMEOUT_SECS".to_string(),
                    value: raw.clone(),
                })?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Ok(Self {
            run_mode,
            api_url: config
                .prop("SCHEDULER_API_URL")
                .unwrap_or(DEFAULT_API_URL.to_string()),
            bind,
            fixtures: config.prop("SCHEDULER_FIXTURES"),
            request_timeout,
        })
    }
}
