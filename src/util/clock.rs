//! Monotonic timestamps and pluggable clock sources.
//!
//! All due times in the registry are [`Timestamp`]s: offsets from a single
//! process-wide origin captured the first time any clock is read. Offsets are
//! plain `Duration`s, so comparisons are total and stable across clock reads.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

static ORIGIN: OnceLock<Instant> = OnceLock::new();

/// A point on the monotonic timeline, measured from the process origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(Duration);

impl Timestamp {
    /// The process origin.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Current monotonic time.
    #[must_use]
    pub fn now() -> Self {
        Self(ORIGIN.get_or_init(Instant::now).elapsed())
    }

    /// Build a timestamp from an offset since the origin.
    #[must_use]
    pub const fn from_offset(offset: Duration) -> Self {
        Self(offset)
    }

    /// Build a timestamp `secs` seconds after the origin.
    #[must_use]
    pub fn from_secs(secs: f64) -> Self {
        Self::ZERO.offset_secs(secs)
    }

    /// Offset since the origin.
    #[must_use]
    pub const fn as_offset(self) -> Duration {
        self.0
    }

    /// Shift by a signed number of seconds.
    ///
    /// Saturates at the origin and at `Duration::MAX`. A NaN shift leaves the
    /// timestamp unchanged.
    #[must_use]
    pub fn offset_secs(self, secs: f64) -> Self {
        if secs.is_nan() {
            return self;
        }
        let magnitude = Duration::try_from_secs_f64(secs.abs()).unwrap_or(Duration::MAX);
        if secs >= 0.0 {
            Self(self.0.saturating_add(magnitude))
        } else {
            Self(self.0.saturating_sub(magnitude))
        }
    }

    /// Signed difference `self - other` in seconds.
    #[must_use]
    pub fn diff_secs(self, other: Self) -> f64 {
        self.0.as_secs_f64() - other.0.as_secs_f64()
    }

    /// Time from `earlier` until `self`, or zero if `earlier` is later.
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

/// Source of "now" for the registry and its wait loop.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> Timestamp;

    /// Map a requested sleep onto the real time the waiter should block.
    ///
    /// Real clocks block for the full request. Simulated clocks may advance
    /// themselves instead and return a shorter (or zero) duration.
    fn sleep_interval(&self, requested: Duration) -> Duration {
        requested
    }
}

/// Monotonic wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Hand-driven clock for tests and simulations.
///
/// Time only moves through [`ManualClock::advance`], [`ManualClock::set`], or a
/// wait-loop sleep: every sleep request advances the clock by the requested
/// amount, is appended to [`ManualClock::sleeps`], and blocks for zero real time.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    /// Clock starting at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Timestamp::ZERO)
    }

    /// Clock starting at `start`.
    #[must_use]
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Move time forward by `secs` seconds.
    pub fn advance(&self, secs: f64) {
        let mut now = self.now.lock();
        *now = now.offset_secs(secs);
    }

    /// Jump to an absolute time.
    pub fn set(&self, time: Timestamp) {
        *self.now.lock() = time;
    }

    /// Every sleep the wait loop has requested so far, in order.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }

    fn sleep_interval(&self, requested: Duration) -> Duration {
        self.sleeps.lock().push(requested);
        let mut now = self.now.lock();
        *now = Timestamp(now.0.saturating_add(requested));
        Duration::ZERO
    }
}
