//! Console appender implementation

use crate::core::{Appender, LogLevel, Result};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Writes lines to a byte stream, standard error by default.
///
/// Each line goes out in a single `write_all` call while the appender is
/// locked by its owner, so concurrent producers never interleave inside a
/// line.
pub struct ConsoleAppender {
    writer: Box<dyn Write + Send>,
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Box::new(writer),
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn set_colors(&mut self, use_colors: bool) {
        self.use_colors = use_colors;
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    /// Replace the destination stream, flushing the old one first
    pub fn set_writer(&mut self, writer: impl Write + Send + 'static) {
        let _ = self.writer.flush();
        self.writer = Box::new(writer);
    }

    /// The level tag as printed on the console
    pub fn tag(&self, level: LogLevel) -> String {
        if self.use_colors {
            level.colored_tag()
        } else {
            level.tag().to_string()
        }
    }

    /// Write `<tag><suffix>` as one line
    pub fn write_entry(&mut self, level: LogLevel, suffix: &str) -> Result<()> {
        let mut line = self.tag(level);
        line.push_str(suffix);
        self.append(&line)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// A cloneable in-memory byte sink.
///
/// All clones share one buffer, so one clone can be handed to a logger as
/// its console writer while another is kept to inspect the output.
///
/// # Example
///
/// ```
/// use leveled_logger::{Logger, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder().writer(buffer.clone()).colors(false).build().unwrap();
/// logger.info("x", vec![]);
/// assert_eq!(buffer.contents(), "[INFO] x \n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Take everything written so far, leaving the buffer empty
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.bytes.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
