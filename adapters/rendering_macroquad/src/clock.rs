//! Frame pacing for the render loop.

use std::{
    thread,
    time::{Duration, Instant},
};

/// Caps the loop at a fixed frame budget and reports whole-millisecond deltas.
#[derive(Debug)]
pub struct FrameClock {
    budget: Duration,
    last_tick: Instant,
}

impl FrameClock {
    /// Creates a clock whose first tick measures from now.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            last_tick: Instant::now(),
        }
    }

    /// Frame budget enforced by [`FrameClock::tick`].
    #[must_use]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Sleeps out the rest of the current frame budget and returns the time
    /// since the previous tick, truncated to whole milliseconds.
    pub fn tick(&mut self) -> Duration {
        let remaining = self.budget.saturating_sub(self.last_tick.elapsed());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }

        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        whole_millis(elapsed)
    }
}

pub(crate) fn whole_millis(duration: Duration) -> Duration {
    Duration::from_millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
