//! Application configuration
//!
//! Settings come from a TOML file and can be overridden through
//! `MEDAL_HELPER_*` environment variables. See [`ConfigLoader`] for the
//! loading order.

pub mod loader;

pub use loader::ConfigLoader;

use crate::engine::{ConcurrencyMode, EngineConfig};
use crate::error::{Error, Result};
use crate::push::PushEndpoint;
use crate::watch::DEFAULT_HEARTBEAT_INTERVAL;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default location of the config file
pub fn default_config_path() -> Result<PathBuf> {
    ProjectDirs::from("com", "medal-helper", "medal-helper")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
    /// Push endpoints by name
    #[serde(default)]
    pub push: HashMap<String, PushEndpoint>,
    #[serde(default)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    /// Wait after each heartbeat
    #[serde(default = "default_heartbeat_interval", with = "humantime_serde")]
    pub heartbeat_interval: Duration,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_heartbeat_interval() -> Duration {
    DEFAULT_HEARTBEAT_INTERVAL
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: default_heartbeat_interval(),
            api_base: default_api_base(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    pub access_key: String,
    /// Name of a `[push.NAME]` endpoint
    #[serde(default)]
    pub push: Option<String>,
    /// Anchor uids to always track; empty tracks every medal
    #[serde(default)]
    pub allowed_uids: Vec<u64>,
    #[serde(default)]
    pub banned_uids: Vec<u64>,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env(|name| std::env::var(name).ok())
    }

    /// Apply `MEDAL_HELPER_*` overrides read through `lookup`
    pub fn merge_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("MEDAL_HELPER_MODE") {
            self.engine.mode = mode
                .parse::<ConcurrencyMode>()
                .map_err(|reason| Error::invalid_configuration("MEDAL_HELPER_MODE", reason))?;
        }

        if let Some(interval) = lookup("MEDAL_HELPER_RETRY_INTERVAL") {
            self.engine.retry_interval_secs = interval.trim().parse().map_err(|_| {
                Error::invalid_configuration(
                    "MEDAL_HELPER_RETRY_INTERVAL",
                    format!("expected whole seconds, got '{interval}'"),
                )
            })?;
        }

        if let Some(retries) = lookup("MEDAL_HELPER_MAX_RETRIES") {
            self.engine.max_retries = retries.trim().parse().map_err(|_| {
                Error::invalid_configuration(
                    "MEDAL_HELPER_MAX_RETRIES",
                    format!("expected a count, got '{retries}'"),
                )
            })?;
        }

        if let Some(level) = lookup("MEDAL_HELPER_LOG_LEVEL") {
            self.log_level = Some(level);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;

        if self.watch.heartbeat_interval.is_zero() {
            return Err(Error::invalid_configuration(
                "watch.heartbeat_interval",
                "must be greater than zero",
            ));
        }

        if self.accounts.is_empty() {
            return Err(Error::invalid_configuration(
                "accounts",
                "at least one account is required",
            ));
        }

        for (position, account) in self.accounts.iter().enumerate() {
            if account.access_key.trim().is_empty() {
                return Err(Error::invalid_configuration(
                    format!("accounts[{position}].access_key"),
                    "must not be empty",
                ));
            }
            if let Some(name) = &account.push {
                if !self.push.contains_key(name) {
                    return Err(Error::invalid_configuration(
                        format!("accounts[{position}].push"),
                        format!("no push endpoint named '{name}'"),
                    ));
                }
            }
        }

        Ok(())
    }
}
