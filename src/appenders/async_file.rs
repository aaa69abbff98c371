//! Background file writer fed by a bounded queue
//!
//! Producers push pre-rendered lines into a bounded channel. One consumer
//! thread owns the file appender and is the only code that touches the file,
//! so writes need no lock. When the queue is full, `enqueue` blocks until
//! the consumer makes room: memory stays bounded, but a stalled disk
//! eventually stalls every producer.

use crate::core::appender::Appender;
use crate::core::error::{ErrorCallback, LoggerError, Result};
use crate::core::metrics::LoggerMetrics;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Queue capacity used when none is configured
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Default time `flush` waits for the consumer to catch up
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

const WORKER_NAME: &str = "leveled-logger-file-writer";

enum FileCommand {
    Line(String),
    Flush(Sender<()>),
}

pub struct AsyncFileWriter {
    sender: Option<Sender<FileCommand>>,
    worker: Option<thread::JoinHandle<()>>,
    capacity: usize,
    metrics: Arc<LoggerMetrics>,
    on_error: ErrorCallback,
}

impl AsyncFileWriter {
    /// Start the consumer thread that owns `appender`.
    ///
    /// If the thread cannot be spawned the failure is reported through
    /// `on_error` and every later line is counted as dropped.
    pub fn start(
        appender: Box<dyn Appender>,
        capacity: usize,
        metrics: Arc<LoggerMetrics>,
        on_error: ErrorCallback,
    ) -> Self {
        let (sender, receiver) = bounded(capacity);
        let worker_metrics = Arc::clone(&metrics);
        let worker_errors = Arc::clone(&on_error);

        let spawned = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || Self::run(appender, receiver, worker_metrics, worker_errors));

        let (sender, worker) = match spawned {
            Ok(handle) => (Some(sender), Some(handle)),
            Err(e) => {
                on_error(&LoggerError::io_operation(
                    "starting file writer",
                    "failed to spawn thread",
                    e,
                ));
                (None, None)
            }
        };

        Self {
            sender,
            worker,
            capacity,
            metrics,
            on_error,
        }
    }

    fn run(
        mut appender: Box<dyn Appender>,
        receiver: Receiver<FileCommand>,
        metrics: Arc<LoggerMetrics>,
        on_error: ErrorCallback,
    ) {
        for command in receiver.iter() {
            match command {
                FileCommand::Line(line) => {
                    match appender.append(&line) {
                        Ok(()) => {
                            metrics.record_written();
                        }
                        Err(e) => {
                            if matches!(e, LoggerError::FileOpen { .. }) {
                                metrics.record_file_open_failure();
                            }
                            metrics.record_dropped();
                            on_error(&e);
                        }
                    }
                    // Flush whenever the queue drains so idle periods leave nothing buffered
                    if receiver.is_empty() {
                        if let Err(e) = appender.flush() {
                            on_error(&e);
                        }
                    }
                }
                FileCommand::Flush(ack) => {
                    if let Err(e) = appender.flush() {
                        on_error(&e);
                    }
                    let _ = ack.send(());
                }
            }
        }

        if let Err(e) = appender.flush() {
            on_error(&e);
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lines currently waiting in the queue
    pub fn queued(&self) -> usize {
        self.sender.as_ref().map_or(0, Sender::len)
    }

    pub fn is_running(&self) -> bool {
        self.sender.is_some()
    }

    /// Queue a line for the consumer, blocking while the queue is full
    pub fn enqueue(&self, line: String) {
        let Some(ref sender) = self.sender else {
            self.metrics.record_dropped();
            return;
        };

        let command = match sender.try_send(FileCommand::Line(line)) {
            Ok(()) => {
                self.metrics.record_enqueued();
                return;
            }
            Err(TrySendError::Full(command)) => command,
            Err(TrySendError::Disconnected(_)) => {
                self.metrics.record_dropped();
                return;
            }
        };

        self.metrics.record_block();
        match sender.send(command) {
            Ok(()) => {
                self.metrics.record_enqueued();
            }
            Err(_) => {
                self.metrics.record_dropped();
            }
        }
    }

    /// Wait until every line queued before this call has been written
    pub fn flush(&self, timeout: Duration) -> Result<()> {
        let sender = self.sender.as_ref().ok_or(LoggerError::WorkerUnavailable)?;
        let (ack_sender, ack_receiver) = bounded(1);
        let deadline = Instant::now() + timeout;

        sender
            .send_timeout(FileCommand::Flush(ack_sender), timeout)
            .map_err(|e| match e {
                crossbeam_channel::SendTimeoutError::Timeout(_) => LoggerError::FlushTimeout(timeout),
                crossbeam_channel::SendTimeoutError::Disconnected(_) => {
                    LoggerError::WorkerUnavailable
                }
            })?;

        let remaining = deadline.saturating_duration_since(Instant::now());
        match ack_receiver.recv_timeout(remaining) {
            Ok(()) => Ok(()),
            Err(RecvTimeoutError::Timeout) => Err(LoggerError::FlushTimeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(LoggerError::WorkerUnavailable),
        }
    }

    /// Close the queue and wait for the consumer to drain it
    ///
    /// Returns `true` if the consumer finished within `timeout`.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        drop(self.sender.take());

        let Some(handle) = self.worker.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if handle.join().is_err() {
                    (self.on_error)(&LoggerError::other("file writer thread panicked"));
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                (self.on_error)(&LoggerError::FlushTimeout(timeout));
                return false;
            }

            thread::sleep(Duration::from_millis(5));
        }
    }
}

impl Drop for AsyncFileWriter {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_FLUSH_TIMEOUT);
    }
}
