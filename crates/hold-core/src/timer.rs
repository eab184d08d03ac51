//! The single pending timer owned by the press driver.

use std::time::{Duration, Instant};

/// Request to arm the timer for a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSpec {
    /// Session the timer belongs to; wakeups for other sessions are stale.
    pub session: u64,
    /// Delay before the first firing.
    pub delay: Duration,
    /// `Some`: keep firing at this spacing after the first firing.
    pub interval: Option<Duration>,
}

/// An armed timer. The driver holds at most one of these at a time;
/// cancelling a session clears it before a new one can be armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub session: u64,
    pub due: Instant,
    pub interval: Option<Duration>,
}

impl PendingTimer {
    /// Arm a timer for `spec`, measuring the delay from `now`.
    pub fn arm(spec: TimerSpec, now: Instant) -> Self {
        Self {
            session: spec.session,
            due: now + spec.delay,
            interval: spec.interval,
        }
    }

    /// Consume one firing. A one-shot timer completes; a ticker advances
    /// to the next tick, anchored at the previous due time so the cadence
    /// does not drift.
    pub fn fire(self) -> Option<Self> {
        self.interval.map(|interval| Self {
            due: self.due + interval,
            ..self
        })
    }
}
