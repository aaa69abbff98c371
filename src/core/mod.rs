//! Core logger types and traits

pub mod appender;
pub mod clock;
pub mod config;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod processor;
pub mod render;
pub mod timestamp;

pub use appender::Appender;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LoggerConfig;
pub use error::{stderr_error_callback, ErrorCallback, LoggerError, Result};
pub use log_entry::{LogEntry, SourceLocation};
pub use log_level::{LevelGate, LogLevel};
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use processor::{Processor, ProcessorChain};
pub use render::{render, LogArg};
pub use timestamp::TimestampFormat;
