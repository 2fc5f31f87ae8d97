//! Injectable time source for the feedback controller.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use web_time::Instant;

/// Source of wall-clock instants, read once per controller cycle.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Reads the platform clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic replay.
///
/// Clones share the same time, so a test can keep one handle while the
/// controller owns another.
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    /// Nanoseconds elapsed since `origin`.
    offset_nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    // u64 nanoseconds cover ~585 years of simulated time
    pub fn advance(&self, by: Duration) {
        self.offset_nanos
            .fetch_add(by.as_nanos() as u64, Ordering::AcqRel);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::try_from_secs_f64(secs).unwrap_or_default());
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.offset_nanos.load(Ordering::Acquire))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}
