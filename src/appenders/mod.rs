//! Appender implementations

pub mod async_file;
pub mod console;
pub mod hourly_file;

pub use async_file::{AsyncFileWriter, DEFAULT_FLUSH_TIMEOUT, DEFAULT_QUEUE_CAPACITY};
pub use console::{ConsoleAppender, SharedBuffer};
pub use hourly_file::{bucket_tag, file_name_for, HourlyFileAppender};

// Re-export the trait for appender implementors
pub use crate::core::Appender;
