//! Application configuration layered from defaults, a TOML file and the environment.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::storage::DEFAULT_LINEUP_FILE;

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "lineup";
/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";
/// Prefix for environment overrides, e.g. `LINEUP_FILE`.
pub const ENV_PREFIX: &str = "LINEUP";

const DEFAULT_CONFIG: &str = r#"# Lineup manager configuration.
# Overridden by the LINEUP_FILE environment variable.

# CSV file holding the lineup, relative to the working directory.
file = "lineup.csv"
"#;

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// CSV file the lineup is loaded from and saved to.
    #[serde(rename = "file")]
    pub lineup_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lineup_file: PathBuf::from(DEFAULT_LINEUP_FILE),
        }
    }
}

impl AppConfig {
    /// Load from the default config file location, if any.
    pub fn load() -> Result<Self> {
        Self::load_layers(default_config_path().as_deref(), process_env())
    }

    /// Load using an explicit config file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layers(Some(path.as_ref()), process_env())
    }

    fn load_layers(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder().set_default("file", DEFAULT_LINEUP_FILE)?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let settings = builder
            .add_source(env)
            .build()
            .context("failed to build configuration")?;
        let config: AppConfig = settings
            .try_deserialize()
            .context("failed to parse configuration")?;
        Ok(config)
    }
}

fn process_env() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
}

/// `<config dir>/lineup/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Write the default config file if it does not exist yet.
pub fn ensure_default_config() -> Result<()> {
    match default_config_path() {
        Some(path) => ensure_config_at(path),
        None => Ok(()),
    }
}

/// Write the default config to `path` unless a file is already there.
pub fn ensure_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!("wrote default config to {}", path.display());
    Ok(())
}
