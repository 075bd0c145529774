// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Millisecond clocks.

use alloc::rc::Rc;
use core::cell::Cell;

/// A monotonic source of millisecond timestamps.
///
/// Timestamps only need to be comparable with each other; the epoch is up
/// to the implementation.
pub trait Clock {
    /// Returns the current time in milliseconds.
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test (or a host that already
/// tracks frame time) can keep one handle and give another to an engine.
///
/// ```rust
/// use understory_timing::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let engine_clock = clock.clone();
/// clock.advance(250);
/// assert_eq!(engine_clock.now_ms(), 250);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    /// Creates a clock starting at `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock starting at `now`.
    #[must_use]
    pub fn starting_at(now: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// Sets the current time. Moving backwards is allowed but not expected.
    pub fn set(&self, now: u64) {
        self.now.set(now);
    }

    /// Advances the current time by `ms`, saturating at `u64::MAX`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// A clock backed by [`std::time::Instant`], measured from its creation.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Creates a clock whose epoch is "now".
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock};

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::starting_at(10);
        let other = clock.clone();
        clock.advance(5);
        assert_eq!(other.now_ms(), 15);
        other.set(3);
        assert_eq!(clock.now_ms(), 3);
    }

    #[test]
    fn manual_clock_advance_saturates() {
        let clock = ManualClock::starting_at(u64::MAX - 1);
        clock.advance(10);
        assert_eq!(clock.now_ms(), u64::MAX);
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_clock_is_monotonic() {
        let clock = super::SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a, "system clock went backwards");
    }
}
