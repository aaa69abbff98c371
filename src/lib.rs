//! # Leveled Logger
//!
//! A lightweight leveled logger for single-process applications.
//!
//! ## Features
//!
//! - **Level gate**: `Debug < Info < Error`, changed atomically at runtime
//! - **Colored console output** to standard error or any `Write` sink
//! - **Detail mode**: timestamp and caller `file:line` on every line
//! - **Processors**: rewrite the format string and arguments before rendering
//! - **Hourly files**: lines are persisted asynchronously to `log_<YYYY-MM-DD_HH>.log`
//!
//! ## Default logger
//!
//! The free functions of this crate act on one process-wide logger. It is
//! created on first use with level `Info`, standard error as console sink,
//! detail off, no processors, file persistence off and a file queue of 100
//! lines, and it lives until the process exits. [`init`] installs a
//! differently configured default before first use.
//!
//! The default logger is never dropped, so lines still queued for the file
//! at exit are lost unless [`flush`] is called first.
//!
//! ```
//! use leveled_logger::{info, LogLevel};
//!
//! leveled_logger::set_level(LogLevel::Debug);
//! info!("listening on port {}", 8080);
//! leveled_logger::flush().unwrap();
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

use std::io::Write;
use std::sync::OnceLock;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, HourlyFileAppender, SharedBuffer};
    pub use crate::core::{
        Appender, Clock, ErrorCallback, LogArg, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, ManualClock, Result, SourceLocation, SystemClock,
        TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

pub use crate::appenders::{ConsoleAppender, HourlyFileAppender, SharedBuffer};
pub use crate::core::{
    Appender, Clock, ErrorCallback, LogArg, LogLevel, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, ManualClock, Result, SourceLocation, SystemClock,
    TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
};

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide default logger, created on first use
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(Logger::new)
}

/// Install a configured default logger.
///
/// Fails with [`LoggerError::AlreadyInitialized`] once the default logger
/// exists, including when a free function already created it implicitly.
pub fn init(builder: LoggerBuilder) -> Result<&'static Logger> {
    let logger = builder.build()?;
    DEFAULT_LOGGER
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    Ok(default_logger())
}

pub fn set_level(level: LogLevel) {
    default_logger().set_level(level);
}

pub fn level() -> LogLevel {
    default_logger().level()
}

pub fn enabled(level: LogLevel) -> bool {
    default_logger().enabled(level)
}

#[track_caller]
pub fn log(level: LogLevel, format: impl Into<String>, args: Vec<LogArg>) {
    default_logger().log(level, format, args);
}

#[track_caller]
pub fn debug(format: impl Into<String>, args: Vec<LogArg>) {
    default_logger().debug(format, args);
}

#[track_caller]
pub fn info(format: impl Into<String>, args: Vec<LogArg>) {
    default_logger().info(format, args);
}

#[track_caller]
pub fn error(format: impl Into<String>, args: Vec<LogArg>) {
    default_logger().error(format, args);
}

pub fn add_processor<F>(processor: F)
where
    F: Fn(String, Vec<LogArg>) -> (String, Vec<LogArg>) + Send + Sync + 'static,
{
    default_logger().add_processor(processor);
}

pub fn show_detail(enabled: bool) {
    default_logger().show_detail(enabled);
}

pub fn set_log_file(enabled: bool) {
    default_logger().set_log_file(enabled);
}

pub fn set_colors(enabled: bool) {
    default_logger().set_colors(enabled);
}

pub fn set_writer(writer: impl Write + Send + 'static) {
    default_logger().set_writer(writer);
}

/// Flush the default logger's console and drain its file queue
pub fn flush() -> Result<()> {
    default_logger().flush()
}

pub fn metrics() -> &'static LoggerMetrics {
    default_logger().metrics()
}
