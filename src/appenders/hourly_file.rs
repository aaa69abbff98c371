//! Hourly rotating file appender
//!
//! Every line is written to `log_<bucket>.log`, where the bucket is the local
//! time of the write truncated to the hour (`YYYY-MM-DD_HH`). The bucket is
//! recomputed for each line; when it differs from the bucket of the open
//! file, that file is closed and the file for the new hour is opened in
//! append mode. Files are never truncated or deleted.

use crate::core::appender::Appender;
use crate::core::clock::Clock;
use crate::core::error::{stderr_error_callback, ErrorCallback, LoggerError, Result};
use crate::core::metrics::LoggerMetrics;
use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// strftime pattern of the bucket tag; sorts chronologically as text
pub const BUCKET_FORMAT: &str = "%Y-%m-%d_%H";

/// The hourly bucket a point in time belongs to
pub fn bucket_tag(at: &DateTime<Local>) -> String {
    at.format(BUCKET_FORMAT).to_string()
}

/// File name for a bucket: `log_2024-03-01_10.log`
pub fn file_name_for(bucket: &str) -> String {
    format!("log_{}.log", bucket)
}

enum FileState {
    Idle,
    Open {
        writer: BufWriter<File>,
        bucket: String,
    },
}

/// Appender owning at most one open hourly file.
///
/// # Examples
///
/// ```no_run
/// use leveled_logger::appenders::HourlyFileAppender;
/// use leveled_logger::core::{Appender, SystemClock};
/// use std::sync::Arc;
///
/// let mut appender = HourlyFileAppender::new("/var/log/myapp", Arc::new(SystemClock));
/// appender.append("[INFO] started \n").unwrap();
/// appender.flush().unwrap();
/// ```
pub struct HourlyFileAppender {
    dir: PathBuf,
    clock: Arc<dyn Clock>,
    state: FileState,
    rotations: u64,
    metrics: Option<Arc<LoggerMetrics>>,
    on_error: ErrorCallback,
}

impl HourlyFileAppender {
    /// No file is opened until the first line arrives
    pub fn new(dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            clock,
            state: FileState::Idle,
            rotations: 0,
            metrics: None,
            on_error: stderr_error_callback(),
        }
    }

    /// Receiver of failures that do not stop the current line, such as a
    /// failed flush of the previous hour's file
    #[must_use]
    pub fn with_error_callback(mut self, on_error: ErrorCallback) -> Self {
        self.on_error = on_error;
        self
    }

    /// Count opened files in `metrics` as well
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<LoggerMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Bucket of the open file, `None` while idle
    pub fn current_bucket(&self) -> Option<&str> {
        match &self.state {
            FileState::Idle => None,
            FileState::Open { bucket, .. } => Some(bucket),
        }
    }

    /// Number of files opened so far
    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    pub fn path_for(&self, bucket: &str) -> PathBuf {
        self.dir.join(file_name_for(bucket))
    }

    /// Close the open file (if any) and open the one for `bucket`.
    ///
    /// A failed flush of the old file is reported and does not keep the new
    /// one from opening. If the open fails the appender is left idle, so the
    /// next line tries again.
    fn rotate(&mut self, bucket: String) -> Result<&mut BufWriter<File>> {
        if let FileState::Open { mut writer, bucket: old } =
            std::mem::replace(&mut self.state, FileState::Idle)
        {
            if let Err(e) = writer.flush() {
                (self.on_error)(&LoggerError::io_operation(
                    "closing log file",
                    format!("Failed to flush '{}'", self.path_for(&old).display()),
                    e,
                ));
            }
            // Dropping a BufWriter whose flush failed would retry the write
            let (file, _unwritten) = writer.into_parts();
            drop(file);
        }

        let path = self.path_for(&bucket);
        fs::create_dir_all(&self.dir).map_err(|e| LoggerError::file_open(&path, e))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_open(&path, e))?;

        self.rotations += 1;
        if let Some(ref metrics) = self.metrics {
            metrics.record_rotation();
        }
        self.state = FileState::Open {
            writer: BufWriter::new(file),
            bucket,
        };
        match &mut self.state {
            FileState::Open { writer, .. } => Ok(writer),
            FileState::Idle => Err(LoggerError::other("log file vanished after open")),
        }
    }

    fn writer_for_now(&mut self) -> Result<&mut BufWriter<File>> {
        let bucket = bucket_tag(&self.clock.now());
        let stale = match &self.state {
            FileState::Open { bucket: open, .. } => *open != bucket,
            FileState::Idle => true,
        };
        if stale {
            return self.rotate(bucket);
        }
        match &mut self.state {
            FileState::Open { writer, .. } => Ok(writer),
            FileState::Idle => Err(LoggerError::other("no log file open")),
        }
    }
}

impl Appender for HourlyFileAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        let writer = self.writer_for_now()?;
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let FileState::Open { writer, .. } = &mut self.state {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "hourly_file"
    }
}

impl Drop for HourlyFileAppender {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
