//! Error types for the logger system

use std::path::Path;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Opening (or creating) an hourly log file failed
    #[error("Error opening file '{path}': {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// The process-wide default logger was already created
    #[error("Default logger already initialized")]
    AlreadyInitialized,

    /// The file writer did not acknowledge a flush in time
    #[error("Flush did not complete within {0:?}")]
    FlushTimeout(std::time::Duration),

    /// The background file writer is not running
    #[error("File writer thread is not running")]
    WorkerUnavailable,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file open error for `path`
    pub fn file_open(path: &Path, source: std::io::Error) -> Self {
        LoggerError::FileOpen {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

/// Callback receiving failures that happen inside the logging pipeline.
///
/// Logging calls never return errors to their caller. Failed file opens,
/// failed writes and similar conditions are handed to this callback instead.
pub type ErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// The fallback diagnostic channel: one line on standard error.
pub fn stderr_error_callback() -> ErrorCallback {
    Arc::new(|err: &LoggerError| eprintln!("[LOGGER ERROR] {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("LoggerBuilder", "queue capacity must be positive");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LoggerError::file_open(Path::new("/var/log/log_2024-01-01_10.log"), io_err);
        assert!(matches!(err, LoggerError::FileOpen { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("LoggerBuilder", "queue capacity must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for LoggerBuilder: queue capacity must be positive"
        );

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LoggerError::file_open(Path::new("logs/log_2024-01-01_10.log"), io_err);
        assert_eq!(
            err.to_string(),
            "Error opening file 'logs/log_2024-01-01_10.log': denied"
        );

        assert_eq!(
            LoggerError::AlreadyInitialized.to_string(),
            "Default logger already initialized"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log file"));
        assert!(err.to_string().contains("cannot write to file"));
    }
}
