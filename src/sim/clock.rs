/// Periodic tick timer.
///
/// The frame loop polls the clock; a `true` from `poll` means one tick is
/// due. `schedule` always replaces the pending deadline, so after a rate
/// change the next tick is one full new period away and nothing fires at
/// the old period.

use std::time::{Duration, Instant};

pub trait Clock {
    /// Cancel whatever is pending and tick every `period` from now on.
    fn schedule(&mut self, period: Duration);
    /// Stop ticking until the next `schedule`.
    fn cancel(&mut self);
    /// Is a tick due at `now`? Consumes the tick if so.
    fn poll(&mut self, now: Instant) -> bool;
    /// Active period, `None` while cancelled.
    fn period(&self) -> Option<Duration>;
}

/// Wall-clock implementation backed by `Instant`.
pub struct IntervalClock {
    period: Option<Duration>,
    next: Instant,
}

impl IntervalClock {
    pub fn new() -> Self {
        IntervalClock { period: None, next: Instant::now() }
    }

    fn schedule_at(&mut self, period: Duration, now: Instant) {
        self.period = Some(period);
        self.next = now + period;
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for IntervalClock {
    fn schedule(&mut self, period: Duration) {
        self.schedule_at(period, Instant::now());
    }

    fn cancel(&mut self) {
        self.period = None;
    }

    fn poll(&mut self, now: Instant) -> bool {
        let Some(period) = self.period else { return false };
        if now < self.next { return false; }
        // Re-arm from now: a stalled frame never causes a burst of ticks.
        self.next = now + period;
        true
    }

    fn period(&self) -> Option<Duration> {
        self.period
    }
}
