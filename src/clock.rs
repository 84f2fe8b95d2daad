//! Time source for the collection loop.
//!
//! The collector never calls `tokio::time::sleep` or `Local::now` directly;
//! it asks a [`Clock`]. [`SystemClock`] is the real thing, [`ManualClock`]
//! is a virtual clock that advances instantly and records every sleep.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};

/// Format used for row timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a time as a row timestamp (`YYYY-MM-DD HH:MM:SS`).
pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Source of wall-clock time and inter-cycle waits.
#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Current local time.
    fn now(&self) -> NaiveDateTime;

    /// Wait for `duration` before the next cycle.
    async fn sleep(&self, duration: Duration);
}

/// Local wall clock backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Virtual clock: sleeping advances time immediately.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use waitwatch::clock::{format_timestamp, Clock, ManualClock};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let clock = ManualClock::starting_at("2024-01-01 10:00:00").unwrap();
/// clock.sleep(Duration::from_secs(30 * 60)).await;
///
/// assert_eq!(format_timestamp(clock.now()), "2024-01-01 10:30:00");
/// assert_eq!(clock.sleeps(), vec![Duration::from_secs(1800)]);
/// # });
/// ```
#[derive(Debug)]
pub struct ManualClock {
    start: NaiveDateTime,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    /// Create a clock reading `start`.
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            start,
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Create a clock from a `YYYY-MM-DD HH:MM:SS` string.
    pub fn starting_at(timestamp: &str) -> Result<Self, chrono::ParseError> {
        let start = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)?;
        Ok(Self::new(start))
    }

    /// Every sleep requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Total virtual time elapsed.
    pub fn elapsed(&self) -> Duration {
        self.sleeps().iter().sum()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        let elapsed = chrono::Duration::from_std(self.elapsed()).unwrap_or(chrono::Duration::MAX);
        self.start
            .checked_add_signed(elapsed)
            .unwrap_or(NaiveDateTime::MAX)
    }

    async fn sleep(&self, duration: Duration) {
        if let Ok(mut sleeps) = self.sleeps.lock() {
            sleeps.push(duration);
        }
    }
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }

    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await
    }
}
