//! Logger metrics for observability
//!
//! Counters for monitoring logger health: lines emitted to the console,
//! lines queued for and written to files, dropped lines, backpressure
//! events and file rotations.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use leveled_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_written();
///
/// assert_eq!(metrics.enqueued_count(), 1);
/// assert_eq!(metrics.written_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines that passed the level gate and were rendered
    emitted: AtomicU64,

    /// Lines handed to the file queue
    enqueued: AtomicU64,

    /// Lines written to a log file by the consumer
    written: AtomicU64,

    /// Lines that never reached a file (open or write failure, worker gone)
    dropped_count: AtomicU64,

    /// Enqueues that found the queue full and had to wait
    block_events: AtomicU64,

    /// Failed attempts to open an hourly file
    file_open_failures: AtomicU64,

    /// Hourly files opened by the consumer
    rotations: AtomicU64,

    /// Console writes that returned an error
    console_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            enqueued: AtomicU64::new(0),
            written: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
            file_open_failures: AtomicU64::new(0),
            rotations: AtomicU64::new(0),
            console_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted_count(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn enqueued_count(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn file_open_failures(&self) -> u64 {
        self.file_open_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rotations(&self) -> u64 {
        self.rotations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn console_failures(&self) -> u64 {
        self.console_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_open_failure(&self) -> u64 {
        self.file_open_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rotation(&self) -> u64 {
        self.rotations.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_failure(&self) -> u64 {
        self.console_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Lines enqueued but neither written nor dropped yet
    pub fn pending(&self) -> u64 {
        self.enqueued_count()
            .saturating_sub(self.written_count() + self.dropped_count())
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            emitted: AtomicU64::new(self.emitted_count()),
            enqueued: AtomicU64::new(self.enqueued_count()),
            written: AtomicU64::new(self.written_count()),
            dropped_count: AtomicU64::new(self.dropped_count()),
            block_events: AtomicU64::new(self.block_events()),
            file_open_failures: AtomicU64::new(self.file_open_failures()),
            rotations: AtomicU64::new(self.rotations()),
            console_failures: AtomicU64::new(self.console_failures()),
        }
    }
}
