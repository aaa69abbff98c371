//! Logging macros.
//!
//! The macros keep the format string and the arguments apart so that
//! processors still see them separately, check the level before any
//! argument is converted, and report the macro call site as the caller
//! location in detail mode.
//!
//! Without a `logger:` prefix they log through the process-wide default
//! logger.
//!
//! # Examples
//!
//! ```
//! use leveled_logger::prelude::*;
//! use leveled_logger::{error, info};
//!
//! let logger = Logger::builder().writer(SharedBuffer::new()).build().unwrap();
//!
//! // Through a specific logger
//! info!(logger: logger, "Server started");
//! info!(logger: logger, "Server listening on port {}", 8080);
//!
//! // Through the default logger
//! error!("Request {} failed: {:?}", 42, "timeout");
//! ```

/// Convert expressions into a `Vec<LogArg>`.
///
/// ```
/// use leveled_logger::{log_args, LogArg};
///
/// let args = log_args!["alice", 3, true];
/// assert_eq!(args[1], LogArg::Int(3));
/// ```
#[macro_export]
macro_rules! log_args {
    ($($arg:expr),* $(,)?) => {
        ::std::vec![$($crate::LogArg::from($arg)),*]
    };
}

/// Log a message at the given level.
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder().writer(SharedBuffer::new()).build().unwrap();
/// use leveled_logger::log;
/// log!(logger: logger, LogLevel::Info, "Simple message");
/// log!(LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $level:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, $fmt, $crate::log_args!($($arg),*));
        }
    }};
    ($level:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!(logger: $crate::default_logger(), $level, $fmt $(, $arg)*)
    };
}

/// Log a debug-level message.
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder().level(LogLevel::Debug).writer(SharedBuffer::new()).build().unwrap();
/// use leveled_logger::debug;
/// debug!(logger: logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($rest:tt)+) => {
        $crate::log!(logger: $logger, $crate::LogLevel::Debug, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::log!($crate::LogLevel::Debug, $($rest)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($rest:tt)+) => {
        $crate::log!(logger: $logger, $crate::LogLevel::Info, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::log!($crate::LogLevel::Info, $($rest)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder().writer(SharedBuffer::new()).build().unwrap();
/// use leveled_logger::error;
/// error!(logger: logger, "Failed to connect: {}", "timeout");
/// ```
#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($rest:tt)+) => {
        $crate::log!(logger: $logger, $crate::LogLevel::Error, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::log!($crate::LogLevel::Error, $($rest)+)
    };
}
