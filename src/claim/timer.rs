//! Tick-driven timers.
//!
//! Timers here are plain values compared against the `Instant` handed to
//! each `tick`. Holding one in an `Option` field scopes it to its owning
//! condition: setting the field to `None` drops the timer, and a dropped
//! timer can never fire again.

use std::time::{Duration, Instant};

/// A one-shot timer that elapses once `now` reaches its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    deadline: Instant,
}

impl Timeout {
    /// Arm a timeout that elapses `delay` after `now`.
    pub fn after(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
        }
    }

    /// Check whether the deadline has been reached.
    pub fn is_elapsed(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// A repeating timer with a fixed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    /// Smallest accepted period. Zero periods are raised to this.
    pub const MIN_PERIOD: Duration = Duration::from_millis(1);

    /// Start an interval whose first firing is one period after `now`.
    pub fn start(now: Instant, period: Duration) -> Self {
        let period = period.max(Self::MIN_PERIOD);
        Self {
            period,
            next: now + period,
        }
    }

    /// The configured period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Advance the interval to `now`.
    ///
    /// Returns how many periods completed since the last poll. Late polls
    /// report every missed firing at once and keep the original cadence.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if now < self.next {
            return 0;
        }
        let late = now.duration_since(self.next).as_nanos();
        let extra = late / self.period.as_nanos();
        let fired = extra.saturating_add(1);
        let step = u32::try_from(fired).unwrap_or(u32::MAX);
        self.next += self.period * step;
        step
    }
}
