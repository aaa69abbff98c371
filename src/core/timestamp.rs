//! Timestamp formatting for detail mode
//!
//! Detail-mode lines carry the local time of the call. The format is
//! configurable; the default is a readable local timestamp with microseconds
//! and the UTC offset.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const READABLE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f %:z";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use leveled_logger::core::TimestampFormat;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2024, 3, 1, 10, 30, 45).unwrap();
/// assert_eq!(
///     TimestampFormat::Custom("%d/%m/%Y %H:%M".to_string()).format(&at),
///     "01/03/2024 10:30"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2024-03-01 10:30:45.123456 +01:00`
    #[default]
    Readable,

    /// ISO 8601 with milliseconds and offset: `2024-03-01T10:30:45.123+01:00`
    Iso8601,

    /// RFC 3339: `2024-03-01T10:30:45.123456789+01:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1709285445`
    Unix,

    /// Unix timestamp in milliseconds: `1709285445123`
    UnixMillis,

    /// Any strftime-compatible format string
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::Readable => datetime.format(READABLE_FORMAT).to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                // A malformed pattern falls back to the readable form
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => datetime.format(READABLE_FORMAT).to_string(),
                }
            }
        }
    }

    /// Whether every strftime specifier of a custom pattern is recognized
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(format_str) => {
                !StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error))
            }
            _ => true,
        }
    }
}
