//! Wall-clock time source

use chrono::{DateTime, Utc};

/// Wall-clock source injected into the application state.
///
/// Millisecond readings share one epoch across calls within a process, and
/// persisted timestamps are assumed comparable across restarts (system clock
/// time). Swapped for a manual clock in tests.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;

    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64 {
        self.now_utc().timestamp_millis()
    }
}

/// System clock backed by `chrono::Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests.
#[cfg(test)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    /// Start at the Unix epoch plus `ms`, for tests that think in offsets.
    pub fn at_epoch_ms(ms: i64) -> Self {
        Self::starting_at(DateTime::from_timestamp_millis(ms).unwrap())
    }

    pub fn advance_ms(&self, ms: i64) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::milliseconds(ms);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
