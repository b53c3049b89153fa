//! Injectable monotonic time source.
//!
//! The only temporal dependency in the engine is the transition cooldown,
//! which needs monotonic elapsed milliseconds. Production code uses
//! [`MonotonicClock`]; tests inject a [`ManualClock`] and advance it
//! explicitly, so cooldown behavior is verified without real sleeps.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond clock.
pub trait TimeSource: std::fmt::Debug {
    /// Milliseconds elapsed since an arbitrary fixed origin. Must never
    /// decrease between calls.
    fn now_ms(&self) -> u64;
}

/// Real monotonic clock backed by [`Instant`], with its origin at
/// construction.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Manually driven clock for deterministic tests.
///
/// Cloning yields a handle onto the same underlying time, so a test can
/// keep one handle and hand the other to the counter:
///
/// ```rust
/// use repmeter_engine::clock::{ManualClock, TimeSource};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance_ms(150);
/// assert_eq!(clock.now_ms(), 150);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    /// Create a clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Set the clock to an absolute time. Saturates rather than going
    /// backwards: a monotonic source never decreases.
    pub fn set_ms(&self, ms: u64) {
        self.now.set(self.now.get().max(ms));
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
