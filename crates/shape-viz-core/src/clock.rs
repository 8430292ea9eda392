//! Fixed frame-rate pacing.

use std::time::{Duration, Instant};

pub struct FrameClock {
    budget: Duration,
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            last_tick: None,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left in the frame budget after `spent`; zero once overrun
    pub fn remaining(&self, spent: Duration) -> Duration {
        self.budget.saturating_sub(spent)
    }

    /// Sleeps out the rest of the current frame, then starts the next one.
    /// Returns how long it slept.
    pub fn tick(&mut self) -> Duration {
        let slept = match self.last_tick {
            Some(last) => {
                let wait = self.remaining(last.elapsed());
                if !wait.is_zero() {
                    std::thread::sleep(wait);
                }
                wait
            }
            None => Duration::ZERO,
        };
        self.last_tick = Some(Instant::now());
        slept
    }
}
