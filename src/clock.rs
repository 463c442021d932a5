use std::cell::Cell;
use std::time::{Duration, Instant};

/// Time source for the search budget.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Reads the real monotonic clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that moves forward by a fixed step every time it is read.
///
/// Lets tests drive a time budget without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    elapsed: Cell<Duration>,
    step: Duration,
}

impl ManualClock {
    pub fn new(step: Duration) -> Self {
        Self {
            base: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
            step,
        }
    }

    /// Moves the clock forward without a read.
    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    /// Total time that has passed on this clock.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let current = self.elapsed.get();
        self.elapsed.set(current + self.step);
        self.base + current
    }
}
