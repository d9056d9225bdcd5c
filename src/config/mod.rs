//! Console configuration
//!
//! Loads a JSON5 file, applies environment overrides and validates the
//! result. A missing file is not an error; defaults apply.

pub mod types;

pub use types::*;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an alternate config file
pub const CONFIG_PATH_ENV: &str = "SOUNDS_CONSOLE_CONFIG";

/// Environment variable overriding the endpoint
pub const ENDPOINT_ENV: &str = "SOUNDS_ENDPOINT";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration: {}", format_issues(.0))]
    Invalid(Vec<ValidationError>),
}

fn format_issues(issues: &[ValidationError]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Resolve the configuration file path.
///
/// `SOUNDS_CONSOLE_CONFIG` wins; otherwise the platform config directory.
pub fn get_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sounds-console")
        .join("config.json5")
}

/// Parse a config file without overrides or validation.
pub fn load_config_file(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(ConsoleConfig::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    json5::from_str(&raw).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply environment overrides.
pub fn apply_env_overrides(config: &mut ConsoleConfig, endpoint: Option<String>) {
    if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
        debug!(endpoint = %endpoint, "Endpoint overridden from environment");
        config.endpoint = endpoint;
    }
}

/// Load, override and validate the configuration at `path`.
pub fn load_config_from(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    let mut config = load_config_file(path)?;
    apply_env_overrides(&mut config, std::env::var(ENDPOINT_ENV).ok());
    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Load the configuration from the resolved path.
pub fn load_config() -> Result<ConsoleConfig, ConfigError> {
    load_config_from(&get_config_path())
}
