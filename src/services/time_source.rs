//! Time source abstraction for testability.
//!
//! The navigator reads the wall clock exactly once per invocation through a
//! `TimeSource`, so production code uses the local system clock while tests
//! pin "now" to a fixed calendar date and advance logical time for notices.

use chrono::{Local, NaiveDate, NaiveDateTime};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Abstraction over time-related operations.
pub trait TimeSource: Send + Sync + std::fmt::Debug {
    /// Get the current instant for measuring elapsed time (notice expiry).
    fn now(&self) -> Instant;

    /// Get the local calendar date and time.
    ///
    /// This is what the monthly file name and today's heading derive from.
    fn local_now(&self) -> NaiveDateTime;

    /// Calculate elapsed time since an earlier instant.
    fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }

    /// Today's local date.
    fn today(&self) -> NaiveDate {
        self.local_now().date()
    }
}

/// Type alias for shared time source.
pub type SharedTimeSource = Arc<dyn TimeSource>;

/// Production implementation using the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeSource;

impl RealTimeSource {
    pub fn new() -> Self {
        Self
    }

    pub fn shared() -> SharedTimeSource {
        Arc::new(Self)
    }
}

impl TimeSource for RealTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Time source pinned to a calendar moment.
///
/// - `local_now()` returns the pinned date-time plus logical elapsed time
/// - `now()` returns a logical instant based on an internal counter
/// - Time only moves via `advance()`
///
/// Used by tests and by the `--date` command-line override.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use moodnote::services::time_source::{FixedTimeSource, TimeSource};
/// use std::time::Duration;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
/// let time = FixedTimeSource::on_date(date);
/// let start = time.now();
///
/// time.advance(Duration::from_secs(5));
///
/// assert!(time.elapsed_since(start) >= Duration::from_secs(5));
/// assert_eq!(time.today(), date);
/// ```
#[derive(Debug)]
pub struct FixedTimeSource {
    /// Logical time in nanoseconds since creation.
    logical_nanos: AtomicU64,
    /// Base instant (real time at creation, used for Instant arithmetic).
    base_instant: Instant,
    /// Calendar moment at logical time zero.
    base: NaiveDateTime,
}

impl FixedTimeSource {
    pub fn at(base: NaiveDateTime) -> Self {
        Self {
            logical_nanos: AtomicU64::new(0),
            base_instant: Instant::now(),
            base,
        }
    }

    /// Pin to midday of `date`, far from either day boundary.
    pub fn on_date(date: NaiveDate) -> Self {
        let noon = chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        Self::at(date.and_time(noon))
    }

    pub fn shared(base: NaiveDateTime) -> Arc<Self> {
        Arc::new(Self::at(base))
    }

    /// Advance logical time by the given duration.
    pub fn advance(&self, duration: Duration) {
        self.logical_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Get the logical elapsed time since creation.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.logical_nanos.load(Ordering::SeqCst))
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Instant {
        self.base_instant + self.elapsed()
    }

    fn local_now(&self) -> NaiveDateTime {
        let elapsed = chrono::Duration::from_std(self.elapsed()).unwrap_or(chrono::Duration::zero());
        self.base
            .checked_add_signed(elapsed)
            .unwrap_or(self.base)
    }
}
