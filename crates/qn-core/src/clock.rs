//! Continuous simulation clock.
//!
//! # Design
//!
//! The clock holds two registers: `current` (the committed simulation time)
//! and `next` (the time of the event just popped from the queue).  Drivers
//! stage the popped event's time with [`set_next`][SimClock::set_next],
//! integrate every center's time-weighted areas over [`width`][SimClock::width],
//! and only then [`advance`][SimClock::advance].  Keeping the two registers
//! explicit makes "integrate before you move the clock" structurally hard to
//! get wrong.

use std::fmt;

/// Two-register event clock.  Cheap to copy; holds no heap data.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Committed simulation time.
    pub current: f64,
    /// Time of the event about to be processed.
    pub next: f64,
}

impl SimClock {
    /// A clock with both registers at `start`.
    pub fn new(start: f64) -> Self {
        SimClock { current: start, next: start }
    }

    /// Stage the next event time.
    ///
    /// Event times come off a time-ordered queue, so `t < current` means the
    /// queue invariant was broken upstream (debug-asserted).
    #[inline]
    pub fn set_next(&mut self, t: f64) {
        debug_assert!(t >= self.current, "clock moving backwards: {} -> {t}", self.current);
        self.next = t;
    }

    /// Width of the staged interval, `next − current`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.next - self.current
    }

    /// Commit the staged time: `current = next`.
    #[inline]
    pub fn advance(&mut self) {
        self.current = self.next;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.6}", self.current)
    }
}
