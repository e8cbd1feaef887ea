//! Shield power-up timer
//!
//! While the shield has time left, obstacle collisions do not end the run.
//! Spawning and collecting shield pickups is handled by the tick; this type
//! only tracks how long the current shield lasts.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Shield {
    duration: Duration,
    remaining: Duration,
}

impl Shield {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            remaining: Duration::ZERO,
        }
    }

    /// Clear any active shield (new game)
    pub fn reset(&mut self) {
        self.deactivate();
    }

    /// Full duration, regardless of what was left
    pub fn activate(&mut self) {
        self.remaining = self.duration;
    }

    pub fn deactivate(&mut self) {
        self.remaining = Duration::ZERO;
    }

    /// Count down by the wall time elapsed since the previous tick
    pub fn update(&mut self, elapsed: Duration) {
        self.remaining = self.remaining.saturating_sub(elapsed);
    }

    pub fn is_active(&self) -> bool {
        !self.remaining.is_zero()
    }

    pub fn remaining_time(&self) -> Duration {
        self.remaining
    }
}
