//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::pace::Pace;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world grid
    pub width: i32,
    /// Height of the world grid
    pub height: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 50,
        }
    }
}

impl WorldConfig {
    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }
}

/// Scoring and bonus parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Longevity bonuses are awarded every this many turns
    pub bonus_interval: u64,
    /// Bonus added to each species that still has living critters
    pub longevity_bonus: u32,
    /// Bonus added to a species whenever one of its critters takes a point cache
    pub point_cache_reward: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bonus_interval: 100,
            longevity_bonus: 10,
            point_cache_reward: 5,
        }
    }
}

/// Point cache spawn parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Chance of a point cache appearing each time the turn count advances
    pub point_cache_odds: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            point_cache_odds: 0.1,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Critters of each competing species created on reset
    pub initial_population: usize,
    /// Full health. New critters start here and colors fade against it.
    pub max_health: i32,
    /// Whether an attacker steps into the cell of the critter it removed
    pub advance_on_kill: bool,
    pub world: WorldConfig,
    pub scoring: ScoringConfig,
    pub spawn: SpawnConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            initial_population: 25,
            max_health: 50,
            advance_on_kill: true,
            world: WorldConfig::default(),
            scoring: ScoringConfig::default(),
            spawn: SpawnConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.world.width <= 0 || self.world.height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "world must be at least 1x1, got {}x{}",
                self.world.width, self.world.height
            )));
        }
        if self.world.width.checked_mul(self.world.height).is_none() {
            return Err(Error::InvalidConfig(format!(
                "world of {}x{} cells is too large",
                self.world.width, self.world.height
            )));
        }
        if self.max_health <= 0 {
            return Err(Error::InvalidConfig(format!(
                "max_health must be positive, got {}",
                self.max_health
            )));
        }
        if self.scoring.bonus_interval == 0 {
            return Err(Error::InvalidConfig(
                "bonus_interval must be at least 1".to_string(),
            ));
        }
        let odds = self.spawn.point_cache_odds;
        if !(0.0..=1.0).contains(&odds) {
            return Err(Error::InvalidConfig(format!(
                "point_cache_odds must be within [0, 1], got {}",
                odds
            )));
        }
        Ok(())
    }
}

/// Headless driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub engine: EngineConfig,
    /// Initial speed on the 1..=200 scale
    pub speed: u32,
    /// Stop after this many turns; run until interrupted when unset
    pub max_turns: Option<u64>,
    /// Log the scoreboard every this many turns (0 disables)
    pub report_every: u64,
    /// Emit logs as JSON lines
    pub json_logs: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            speed: Pace::DEFAULT_SPEED,
            max_turns: Some(1_000),
            report_every: 100,
            json_logs: false,
        }
    }
}

impl DriverConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: DriverConfig = serde_json::from_str(&text)?;
        config.engine.validate()?;
        debug!(path = %path.display(), "Loaded driver configuration");
        Ok(config)
    }
}
