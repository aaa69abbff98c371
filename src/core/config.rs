//! Logger configuration

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use crate::appenders::async_file::DEFAULT_QUEUE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Plain-data logger settings
///
/// The defaults match the process-wide default logger: level `Info`, no
/// detail, no file persistence, colored tags, a queue of 100 lines and log
/// files in the current directory.
///
/// # Example
///
/// ```
/// use leveled_logger::{LoggerConfig, LogLevel};
///
/// let config = LoggerConfig::from_json(r#"{ "level": "Debug", "log_dir": "/tmp/logs" }"#).unwrap();
/// assert_eq!(config.level, LogLevel::Debug);
/// assert_eq!(config.queue_capacity, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub show_detail: bool,
    pub log_to_file: bool,
    pub log_dir: PathBuf,
    pub queue_capacity: usize,
    pub colors: bool,
    pub timestamp_format: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            show_detail: false,
            log_to_file: false,
            log_dir: PathBuf::from("."),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "queue_capacity",
                "the file queue needs room for at least one line",
            ));
        }
        if !self.timestamp_format.is_valid() {
            return Err(LoggerError::config(
                "timestamp_format",
                format!("unrecognized strftime pattern {:?}", self.timestamp_format),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert!(!config.show_detail);
        assert!(!config.log_to_file);
        assert!(config.colors);
        assert_eq!(config.queue_capacity, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = LoggerConfig::from_json(
            r#"{ "level": "Error", "show_detail": true, "timestamp_format": { "Custom": "%H:%M" } }"#,
        )
        .unwrap();
        assert_eq!(config.level, LogLevel::Error);
        assert!(config.show_detail);
        assert_eq!(config.timestamp_format, TimestampFormat::Custom("%H:%M".into()));
        assert_eq!(config.log_dir, PathBuf::from("."));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = LoggerConfig::from_json(r#"{ "queue_capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_invalid_timestamp_pattern_rejected() {
        let err = LoggerConfig::from_json(
            r#"{ "show_detail": true, "timestamp_format": { "Custom": "%Q" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("timestamp_format"));
    }

    #[test]
    fn test_malformed_json() {
        let err = LoggerConfig::from_json("{ level: ").unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }
}
