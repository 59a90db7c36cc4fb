use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".hookguard.json";

/// Environment variable holding the skip directive.
pub const SKIP_ENV: &str = "SKIP_CHECKS";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Plugin source locations, in load order, relative to the repository root.
    #[serde(default = "default_plugin_directories")]
    pub plugin_directories: Vec<String>,
    /// Paths whose modification needs an explicit override.
    #[serde(default = "default_restricted_paths")]
    pub restricted_paths: Vec<String>,
    /// Per-check overrides, keyed by check name.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiet: Option<bool>,
    /// Glob patterns replacing the check's own file filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

fn default_plugin_directories() -> Vec<String> {
    vec![".githooks".to_string()]
}

fn default_restricted_paths() -> Vec<String> {
    vec!["vendor".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plugin_directories: default_plugin_directories(),
            restricted_paths: default_restricted_paths(),
            checks: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any `include` glob pattern is invalid.
    pub fn validate(&self) -> Result<()> {
        for (name, check) in &self.checks {
            for pattern in check.include.iter().flatten() {
                Pattern::new(pattern).with_context(|| {
                    format!(
                        "Invalid glob pattern in 'checks.{}.include': \"{}\"",
                        name, pattern
                    )
                })?;
            }
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
