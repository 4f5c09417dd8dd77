//! Speed control for drivers that step the engine on a timer.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simulation speed on a 1..=200 scale. Pacing only; the engine never sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pace {
    speed: u32,
}

impl Pace {
    pub const MIN_SPEED: u32 = 1;
    pub const MAX_SPEED: u32 = 200;
    pub const DEFAULT_SPEED: u32 = 10;
    /// Delay at speed 1, in milliseconds
    const BASE_DELAY_MS: u64 = 500;

    pub fn new(speed: u32) -> Self {
        Self {
            speed: speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED),
        }
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Adjust by `delta`, staying inside the slider range
    pub fn change_speed(&mut self, delta: i64) -> u32 {
        let next = (self.speed as i64 + delta).clamp(Self::MIN_SPEED as i64, Self::MAX_SPEED as i64);
        self.speed = next as u32;
        self.speed
    }

    /// Pause between two turns
    pub fn delay(&self) -> Duration {
        Duration::from_millis(Self::BASE_DELAY_MS / self.speed as u64)
    }
}

impl Default for Pace {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SPEED)
    }
}
