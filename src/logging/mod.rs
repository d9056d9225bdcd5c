//! Structured logging
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` built from the
//! configured level (or `RUST_LOG` when set) and a text or JSON formatter
//! writing to stderr, so command output on stdout stays clean.

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::{LogFormat, LoggingConfig};

/// Logging error types
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {message}")]
    Filter { filter: String, message: String },

    #[error("initialization error: {0}")]
    Init(String),
}

/// Build the filter, letting `RUST_LOG` take precedence over the config.
pub fn build_filter(
    config: &LoggingConfig,
    rust_log: Option<String>,
) -> Result<EnvFilter, LoggingError> {
    let directive = rust_log
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| config.level.clone());
    EnvFilter::try_new(&directive).map_err(|e| LoggingError::Filter {
        filter: directive,
        message: e.to_string(),
    })
}

/// Initialize logging with the given configuration
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<(), LoggingError> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        build_filter(config, std::env::var("RUST_LOG").ok())?
    };

    let result = match config.format {
        LogFormat::Json => Registry::default()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => Registry::default()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    result.map_err(|e| LoggingError::Init(e.to_string()))?;

    debug!(format = ?config.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_config() {
        let config = LoggingConfig {
            level: "sounds_console=debug".to_string(),
            format: LogFormat::Text,
        };
        let filter = build_filter(&config, None).unwrap();
        assert_eq!(filter.to_string(), "sounds_console=debug");
    }

    #[test]
    fn test_rust_log_wins() {
        let config = LoggingConfig::default();
        let filter = build_filter(&config, Some("trace".to_string())).unwrap();
        assert_eq!(filter.to_string(), "trace");

        let filter = build_filter(&config, Some(String::new())).unwrap();
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_invalid_filter() {
        let config = LoggingConfig {
            level: "sounds_console=loud".to_string(),
            format: LogFormat::Json,
        };
        assert!(matches!(
            build_filter(&config, None),
            Err(LoggingError::Filter { .. })
        ));
    }
}
