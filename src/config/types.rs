//! Typed configuration structures
//!
//! Strongly-typed access to the console configuration with validation and
//! default values.

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// Base URL of the device's command API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:80".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// Parsed endpoint URL
    pub fn endpoint_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.endpoint)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        match self.endpoint_url() {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                errors.push(ValidationError {
                    path: "endpoint".to_string(),
                    message: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
            Ok(_) => {}
            Err(e) => errors.push(ValidationError {
                path: "endpoint".to_string(),
                message: e.to_string(),
            }),
        }

        if self.timeout_secs == 0 {
            errors.push(ValidationError {
                path: "timeoutSecs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError {
                path: "logging.level".to_string(),
                message: e,
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Filter directive (error, warn, info, debug, trace or a full EnvFilter)
    #[serde(default = "default_level")]
    pub level: String,

    /// Log format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("log level must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:80");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ConsoleConfig =
            serde_json::from_str(r#"{"endpoint": "http://raspi.local:8080"}"#).unwrap();
        assert_eq!(config.endpoint, "http://raspi.local:8080");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_validate_collects_every_error() {
        let config = ConsoleConfig {
            endpoint: "ftp://raspi.local".to_string(),
            timeout_secs: 0,
            logging: LoggingConfig {
                level: " ".to_string(),
                format: LogFormat::Text,
            },
        };
        let errors = config.validate().unwrap_err();
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["endpoint", "timeoutSecs", "logging.level"]);
    }

    #[test]
    fn test_validate_rejects_unparseable_endpoint() {
        let config = ConsoleConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors[0].path, "endpoint");
    }

    #[test]
    fn test_log_format_serde() {
        let logging: LoggingConfig =
            serde_json::from_str(r#"{"level": "debug", "format": "json"}"#).unwrap();
        assert_eq!(logging.format, LogFormat::Json);
    }
}
