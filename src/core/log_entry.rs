//! Log entry structure and line assembly

use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Local};
use std::fmt;
use std::panic::Location;
use std::path::Path;

/// Source position of a logging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// The location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// File name without its directories
    pub fn file_name(&self) -> &'static str {
        Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name(), self.line)
    }
}

/// One rendered log call, ready to be written out
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub body: String,
    /// Present only in detail mode
    pub timestamp: Option<DateTime<Local>>,
    /// Present only in detail mode
    pub location: Option<SourceLocation>,
}

impl LogEntry {
    pub fn new(level: LogLevel, body: String) -> Self {
        Self {
            level,
            body,
            timestamp: None,
            location: None,
        }
    }

    pub fn with_detail(mut self, timestamp: DateTime<Local>, location: SourceLocation) -> Self {
        self.timestamp = Some(timestamp);
        self.location = Some(location);
        self
    }

    /// Everything after the level tag: ` [<timestamp> <file>:<line> ]<body> \n`
    ///
    /// The leading space, the space before the newline and the newline are
    /// part of the line format and are always present.
    pub fn format_suffix(&self, timestamp_format: &TimestampFormat) -> String {
        let mut line = String::with_capacity(self.body.len() + 64);
        line.push(' ');
        if let Some(ref timestamp) = self.timestamp {
            line.push_str(&timestamp_format.format(timestamp));
            line.push(' ');
        }
        if let Some(ref location) = self.location {
            line.push_str(&location.to_string());
            line.push(' ');
        }
        line.push_str(&self.body);
        line.push_str(" \n");
        line
    }

    /// The uncolored line persisted to files: `[INFO] ...`
    pub fn format_plain(&self, timestamp_format: &TimestampFormat) -> String {
        Self::plain_line(self.level, &self.format_suffix(timestamp_format))
    }

    /// Plain tag followed by an already formatted suffix
    pub fn plain_line(level: LogLevel, suffix: &str) -> String {
        let tag = level.tag();
        let mut line = String::with_capacity(tag.len() + suffix.len());
        line.push_str(tag);
        line.push_str(suffix);
        line
    }
}
