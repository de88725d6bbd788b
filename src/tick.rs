use std::time::{Duration, Instant};

/// Gates simulation steps on wall-clock time. The frame loop asks every
/// frame; a step is due once `interval` has passed since the previous one.
#[derive(Debug, Clone, Copy)]
pub struct TickDriver {
    last_tick: Instant,
}

impl TickDriver {
    pub fn new(now: Instant) -> Self {
        TickDriver { last_tick: now }
    }

    pub fn due(&mut self, now: Instant, interval: Duration) -> bool {
        if now.saturating_duration_since(self.last_tick) >= interval {
            self.last_tick = now;
            return true;
        }
        false
    }
}
