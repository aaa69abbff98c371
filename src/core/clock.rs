//! Time source for timestamps and hourly buckets

use chrono::{DateTime, Duration, Local};
use parking_lot::Mutex;

/// Supplies the current local time.
///
/// The logger samples it for detail-mode timestamps and the file writer
/// samples it once per written line to pick the hourly bucket.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to
///
/// # Example
///
/// ```
/// use leveled_logger::core::{Clock, ManualClock};
/// use chrono::{Duration, Local, TimeZone};
///
/// let clock = ManualClock::new(Local.with_ymd_and_hms(2024, 3, 1, 10, 59, 0).unwrap());
/// clock.advance(Duration::minutes(2));
/// assert_eq!(clock.now(), Local.with_ymd_and_hms(2024, 3, 1, 11, 1, 0).unwrap());
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, to: DateTime<Local>) {
        *self.now.lock() = to;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock()
    }
}
