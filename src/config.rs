//! Planner configuration.
//!
//! Read from `{config_dir}/parent-planner/config.json`, then overridden by
//! environment variables:
//! - `PLANNER_REMOTE_URL` - base URL of the remote progress service
//! - `PLANNER_API_KEY` - bearer key for the remote service (and for `serve`)
//! - `PLANNER_DB_PATH` - SQLite file for the local store
//! - `PLANNER_CATALOG_PATH` - catalog JSON replacing the embedded seed

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "parent-planner";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerConfig {
    /// Remote progress service. Sync is disabled when unset.
    #[serde(default)]
    pub remote_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Defaults to the platform data directory.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    /// Defaults to the embedded catalog.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Icon attached to reminder notifications.
    #[serde(default)]
    pub icon_url: Option<String>,
}

impl PlannerConfig {
    /// Load the config file and apply environment overrides.
    /// Falls back to defaults if the file is missing or fails to parse.
    pub fn load() -> Self {
        let file = match get_config_path().and_then(|p| Self::load_file(&p)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        file.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup, normally the process environment.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("PLANNER_REMOTE_URL") {
            self.remote_url = Some(url);
        }
        if let Some(key) = lookup("PLANNER_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(path) = lookup("PLANNER_DB_PATH") {
            self.db_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("PLANNER_CATALOG_PATH") {
            self.catalog_path = Some(PathBuf::from(path));
        }
        self
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
