//! Main logger implementation

use super::{
    clock::{Clock, SystemClock},
    config::LoggerConfig,
    error::{stderr_error_callback, ErrorCallback, Result},
    log_entry::{LogEntry, SourceLocation},
    log_level::{LevelGate, LogLevel},
    metrics::LoggerMetrics,
    processor::ProcessorChain,
    render::LogArg,
    timestamp::TimestampFormat,
};
use crate::appenders::async_file::{AsyncFileWriter, DEFAULT_FLUSH_TIMEOUT};
use crate::appenders::console::ConsoleAppender;
use crate::appenders::hourly_file::HourlyFileAppender;
use crate::core::appender::Appender;
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default shutdown timeout for draining the file queue (5 seconds)
///
/// Used when the logger is dropped without an explicit `shutdown()`.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// A leveled logger.
///
/// Every call at or above the threshold is rendered once, written
/// synchronously to the console sink and, while file persistence is on,
/// queued for the background writer that appends it to the current hourly
/// file. All methods take `&self`; a logger can be shared between threads
/// as-is or behind an `Arc`.
pub struct Logger {
    gate: LevelGate,
    show_detail: AtomicBool,
    log_to_file: AtomicBool,
    processors: ProcessorChain,
    console: Mutex<ConsoleAppender>,
    file_writer: AsyncFileWriter,
    clock: Arc<dyn Clock>,
    timestamp_format: TimestampFormat,
    log_dir: PathBuf,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// A logger with the default settings, writing to standard error
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(
            LoggerConfig::default(),
            ConsoleAppender::new(),
            Arc::new(SystemClock),
            stderr_error_callback(),
        )
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use leveled_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .show_detail(true)
    ///     .queue_capacity(1000)
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn from_parts(
        config: LoggerConfig,
        console: ConsoleAppender,
        clock: Arc<dyn Clock>,
        on_error: ErrorCallback,
    ) -> Self {
        let metrics = Arc::new(LoggerMetrics::new());
        let file_appender = HourlyFileAppender::new(config.log_dir.clone(), Arc::clone(&clock))
            .with_metrics(Arc::clone(&metrics))
            .with_error_callback(Arc::clone(&on_error));
        let file_writer = AsyncFileWriter::start(
            Box::new(file_appender) as Box<dyn Appender>,
            config.queue_capacity,
            Arc::clone(&metrics),
            on_error,
        );

        Self {
            gate: LevelGate::new(config.level),
            show_detail: AtomicBool::new(config.show_detail),
            log_to_file: AtomicBool::new(config.log_to_file),
            processors: ProcessorChain::new(),
            console: Mutex::new(console.with_colors(config.colors)),
            file_writer,
            clock,
            timestamp_format: config.timestamp_format,
            log_dir: config.log_dir,
            metrics,
        }
    }

    pub fn set_level(&self, level: LogLevel) {
        self.gate.set(level);
    }

    pub fn level(&self) -> LogLevel {
        self.gate.get()
    }

    /// Whether a call at `level` would produce output
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.gate.allows(level)
    }

    /// Include the timestamp and caller location in every line
    pub fn show_detail(&self, enabled: bool) {
        self.show_detail.store(enabled, Ordering::SeqCst);
    }

    pub fn detail_shown(&self) -> bool {
        self.show_detail.load(Ordering::SeqCst)
    }

    /// Route rendered lines to the hourly log files
    pub fn set_log_file(&self, enabled: bool) {
        self.log_to_file.store(enabled, Ordering::SeqCst);
    }

    pub fn logs_to_file(&self) -> bool {
        self.log_to_file.load(Ordering::SeqCst)
    }

    /// Directory receiving the `log_<bucket>.log` files
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Color the console level tag (file lines are never colored)
    pub fn set_colors(&self, enabled: bool) {
        self.console.lock().set_colors(enabled);
    }

    /// Replace the console destination
    pub fn set_writer(&self, writer: impl Write + Send + 'static) {
        self.console.lock().set_writer(writer);
    }

    /// Append a processor; it runs after every processor added before it
    ///
    /// # Example
    ///
    /// ```
    /// use leveled_logger::{Logger, SharedBuffer};
    ///
    /// let buffer = SharedBuffer::new();
    /// let logger = Logger::builder().writer(buffer.clone()).colors(false).build().unwrap();
    /// logger.add_processor(|format, args| (format!("[svc] {}", format), args));
    /// logger.info("ready", vec![]);
    /// assert_eq!(buffer.contents(), "[INFO] [svc] ready \n");
    /// ```
    pub fn add_processor<F>(&self, processor: F)
    where
        F: Fn(String, Vec<LogArg>) -> (String, Vec<LogArg>) + Send + Sync + 'static,
    {
        self.processors.add(Arc::new(processor));
    }

    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    /// Log at `level`; the caller's source location is captured automatically
    #[track_caller]
    #[inline]
    pub fn log(&self, level: LogLevel, format: impl Into<String>, args: Vec<LogArg>) {
        self.log_at(level, SourceLocation::caller(), format, args);
    }

    /// Log at `level` with an explicitly supplied source location
    pub fn log_at(
        &self,
        level: LogLevel,
        location: SourceLocation,
        format: impl Into<String>,
        args: Vec<LogArg>,
    ) {
        if !self.gate.allows(level) {
            return;
        }

        let body = self.processors.render(format.into(), args);
        let mut entry = LogEntry::new(level, body);
        if self.detail_shown() {
            entry = entry.with_detail(self.clock.now(), location);
        }
        let suffix = entry.format_suffix(&self.timestamp_format);
        self.metrics.record_emitted();

        if self.console.lock().write_entry(level, &suffix).is_err() {
            self.metrics.record_console_failure();
        }

        if self.logs_to_file() {
            self.file_writer.enqueue(LogEntry::plain_line(level, &suffix));
        }
    }

    #[track_caller]
    #[inline]
    pub fn debug(&self, format: impl Into<String>, args: Vec<LogArg>) {
        self.log(LogLevel::Debug, format, args);
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, format: impl Into<String>, args: Vec<LogArg>) {
        self.log(LogLevel::Info, format, args);
    }

    #[track_caller]
    #[inline]
    pub fn error(&self, format: impl Into<String>, args: Vec<LogArg>) {
        self.log(LogLevel::Error, format, args);
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use leveled_logger::{Logger, SharedBuffer};
    ///
    /// let logger = Logger::builder().writer(SharedBuffer::new()).build().unwrap();
    /// logger.info("hello", vec![]);
    /// assert_eq!(logger.metrics().emitted_count(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Lines waiting in the file queue
    pub fn queued(&self) -> usize {
        self.file_writer.queued()
    }

    /// Flush the console and wait until every queued line reached its file
    pub fn flush(&self) -> Result<()> {
        self.flush_timeout(DEFAULT_FLUSH_TIMEOUT)
    }

    pub fn flush_timeout(&self, timeout: Duration) -> Result<()> {
        self.console.lock().flush()?;
        self.file_writer.flush(timeout)
    }

    /// Stop the file writer after it has drained the queue
    ///
    /// Returns `true` if the queue was drained within `timeout`. Lines
    /// logged afterwards still reach the console but are no longer
    /// persisted.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        let drained = self.file_writer.shutdown(timeout);
        let _ = self.console.lock().flush();
        drained
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use leveled_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .writer(SharedBuffer::new())
///     .log_dir(std::env::temp_dir())
///     .on_error(Arc::new(|err: &LoggerError| eprintln!("logging failed: {}", err)))
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    writer: Option<Box<dyn Write + Send>>,
    clock: Option<Arc<dyn Clock>>,
    on_error: Option<ErrorCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            writer: None,
            clock: None,
            on_error: None,
        }
    }

    /// Start from a complete configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn show_detail(mut self, enabled: bool) -> Self {
        self.config.show_detail = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_to_file(mut self, enabled: bool) -> Self {
        self.config.log_to_file = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = dir.into();
        self
    }

    /// Capacity of the file queue; producers block while it is full
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.config.colors = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    /// Console destination (standard error if not set)
    #[must_use = "builder methods return a new value"]
    pub fn writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Time source for detail timestamps and hourly buckets
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Receiver of pipeline failures (standard error if not set)
    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;
        let console = match self.writer {
            Some(writer) => ConsoleAppender::with_writer(writer),
            None => ConsoleAppender::new(),
        };
        Ok(Logger::from_parts(
            self.config,
            console,
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.on_error.unwrap_or_else(stderr_error_callback),
        ))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
