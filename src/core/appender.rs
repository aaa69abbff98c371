//! Appender trait for log output destinations

use super::error::Result;

/// A destination for fully formatted log lines.
///
/// Lines arrive complete, including the level tag and the trailing newline.
pub trait Appender: Send {
    fn append(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
