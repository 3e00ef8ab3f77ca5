use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct JsonServiceConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub store: StoreConfig,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub directory: PathBuf,
}

impl JsonServiceConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        Ok(JsonServiceConfig {
            common: common_config,
            store: StoreConfig {
                directory: PathBuf::from(get_env("JSON_DIRECTORY", "json")),
            },
            debug: parse_bool("JSON_DEBUG", &get_env("JSON_DEBUG", "false"))?,
        })
    }

    /// Debug mode forces `debug` regardless of the configured level.
    pub fn log_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.common.log_level
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.common.host, self.common.port)
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be a boolean, got '{}'",
            key,
            other
        ))),
    }
}
