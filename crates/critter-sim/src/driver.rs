//! Run control around an engine: play/pause, single steps, speed.

use critter_core::{Pace, Result};
use critter_world::{Engine, MoveEvent, Summary};
use rand::RngCore;
use tracing::{debug, info};

pub struct Driver<R: RngCore> {
    engine: Engine<R>,
    pace: Pace,
    running: bool,
}

impl<R: RngCore> Driver<R> {
    /// A paused driver
    pub fn new(engine: Engine<R>, pace: Pace) -> Self {
        Self {
            engine,
            pace,
            running: false,
        }
    }

    pub fn play(&mut self) {
        if !self.running {
            debug!(turn = self.engine.turn_count(), "Playing");
        }
        self.running = true;
    }

    pub fn pause(&mut self) {
        if self.running {
            debug!(turn = self.engine.turn_count(), "Paused");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Play one round. Pauses once no competitor is left alive.
    pub fn turn(&mut self) -> Vec<MoveEvent> {
        let events = self.engine.turn();
        if self.engine.scoreboard().population() == 0 {
            info!(turn = self.engine.turn_count(), "No competitors left, pausing");
            self.pause();
        }
        events
    }

    /// One critter action followed by any spawn it triggered
    pub fn tick(&mut self) -> Vec<MoveEvent> {
        let first = self.engine.tick();
        if first.is_idle() {
            return Vec::new();
        }
        let mut events = vec![first];
        events.extend(self.engine.take_spawned());
        events
    }

    /// Stop and lay out a fresh world
    pub fn reset(&mut self, population: usize) -> Result<()> {
        self.pause();
        self.engine.reset(population)
    }

    /// Nudge the speed and return the new value
    pub fn change_speed(&mut self, delta: i64) -> u32 {
        let speed = self.pace.change_speed(delta);
        debug!(speed, delay_ms = self.pace.delay().as_millis() as u64, "Speed changed");
        speed
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    /// Scoreboard lines in presentation order
    pub fn report(&self) -> Vec<String> {
        self.engine
            .scoreboard()
            .display_order()
            .into_iter()
            .map(|row| row.to_string())
            .collect()
    }

    pub fn summary(&self) -> Summary {
        self.engine.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critter_core::{EngineConfig, Position, WorldConfig};
    use rand_chacha::ChaCha8Rng;

    fn engine(population: usize) -> Engine<ChaCha8Rng> {
        let mut config = EngineConfig {
            seed: 3,
            initial_population: population,
            world: WorldConfig {
                width: 10,
                height: 10,
            },
            ..Default::default()
        };
        config.spawn.point_cache_odds = 0.0;
        Engine::with_builtins(config).unwrap()
    }

    fn driver(population: usize) -> Driver<ChaCha8Rng> {
        Driver::new(engine(population), Pace::default())
    }

    #[test]
    fn test_starts_paused() {
        let mut driver = driver(1);
        assert!(!driver.is_running());
        driver.play();
        assert!(driver.is_running());
        driver.pause();
        assert!(!driver.is_running());
    }

    #[test]
    fn test_reset_stops_running() {
        let mut driver = driver(2);
        driver.play();
        driver.turn();
        assert!(driver.engine().turn_count() > 0);

        driver.reset(1).unwrap();
        assert!(!driver.is_running());
        assert_eq!(driver.engine().turn_count(), 0);
        assert_eq!(driver.engine().population(), 4);
    }

    #[test]
    fn test_failed_reset_still_pauses() {
        let mut driver = driver(1);
        driver.play();
        assert!(driver.reset(30).is_err());
        assert!(!driver.is_running());
        assert_eq!(driver.engine().population(), 4);
    }

    #[test]
    fn test_tick_acts_once() {
        let mut driver = driver(1);
        let events = driver.tick();
        assert_eq!(events.len(), 1);
        assert_eq!(driver.engine().turn_count(), 1);
    }

    #[test]
    fn test_empty_world_pauses() {
        let mut driver = driver(0);
        assert!(driver.tick().is_empty());

        driver.play();
        assert!(driver.turn().is_empty());
        assert!(!driver.is_running());
    }

    #[test]
    fn test_caches_alone_pause_the_driver() {
        let mut engine = engine(0);
        let cache = engine.roster().point_cache().unwrap();
        engine.place_critter(cache, Position::new(4, 4)).unwrap();
        let mut driver = Driver::new(engine, Pace::default());

        driver.play();
        assert!(driver.turn().is_empty());
        assert!(!driver.is_running());
        assert_eq!(driver.engine().turn_count(), 0);
        assert_eq!(driver.engine().population(), 1);
    }

    #[test]
    fn test_change_speed_clamps() {
        let mut driver = driver(0);
        assert_eq!(driver.change_speed(5), 15);
        assert_eq!(driver.change_speed(1_000), Pace::MAX_SPEED);
        assert_eq!(driver.change_speed(-1_000), Pace::MIN_SPEED);
        assert_eq!(driver.pace().speed(), Pace::MIN_SPEED);
    }

    #[test]
    fn test_report_lists_every_species() {
        let driver = driver(1);
        let lines = driver.report();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Bear: 1 + 0 + 0 = 1");
        assert_eq!(lines[3], "Stone: 1 + 0 + 0 = 1");
    }
}
