use crate::constants::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
use crate::error::{EtlError, Result};
use crate::types::RowTags;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    pub tags: RowTags,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the rolling JSON log file
    pub dir: PathBuf,
    pub file_prefix: String,
    /// Used when RUST_LOG is not set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            file_prefix: "profile-etl.log".to_string(),
            filter: "profile_etl=info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write output files here instead of next to the input
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Resolve the config file: explicit path, then `PROFILE_ETL_CONFIG`,
    /// then `profile-etl.toml` in the working directory. Falls back to defaults
    /// when none of them is present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Self::from_file(Path::new(&path));
            }
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::from_file(default_path);
        }
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EtlError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.logging.file_prefix.trim().is_empty() {
            return Err(EtlError::Config(
                "logging.file_prefix must not be empty".to_string(),
            ));
        }
        Ok(config)
    }
}
