//! Log level definitions and the atomic level gate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Error = 2,
}

impl LogLevel {
    pub const ALL: [LogLevel; 3] = [LogLevel::Debug, LogLevel::Info, LogLevel::Error];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        }
    }

    /// The bracketed tag written in front of every line, e.g. `[INFO]`
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Info => "[INFO]",
            LogLevel::Error => "[ERROR]",
        }
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Yellow,
            LogLevel::Info => Green,
            LogLevel::Error => Red,
        }
    }

    /// The tag wrapped in ANSI color escapes: `\x1b[32m[INFO]\x1b[0m`
    ///
    /// Built from the raw escape codes so the bytes do not depend on
    /// terminal detection.
    pub fn colored_tag(&self) -> String {
        format!("\x1b[{}m{}\x1b[0m", self.color_code().to_fg_str(), self.tag())
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            _ => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Severity threshold shared by every caller of a logger.
///
/// Reads and writes are single atomic operations with sequentially
/// consistent ordering, so a threshold change on one thread is observed by
/// the next log call on any other thread.
#[derive(Debug)]
pub struct LevelGate {
    threshold: AtomicU8,
}

impl LevelGate {
    pub const fn new(level: LogLevel) -> Self {
        Self {
            threshold: AtomicU8::new(level as u8),
        }
    }

    #[inline]
    pub fn set(&self, level: LogLevel) {
        self.threshold.store(level as u8, Ordering::SeqCst);
    }

    #[inline]
    pub fn get(&self) -> LogLevel {
        LogLevel::from_u8(self.threshold.load(Ordering::SeqCst))
    }

    /// Whether a call at `level` passes the current threshold
    #[inline]
    pub fn allows(&self, level: LogLevel) -> bool {
        level as u8 >= self.threshold.load(Ordering::SeqCst)
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}
