//! Turn-count driven mechanics: longevity bonuses and point cache spawns.

use crate::event::MoveEvent;
use crate::simulation::Engine;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::{debug, info, trace};

impl<R: RngCore> Engine<R> {
    /// Runs after every increment of the turn count
    pub(crate) fn on_turn_advanced(&mut self) {
        if self.turn_count % self.config.scoring.bonus_interval == 0 {
            self.award_bonuses();
        }

        if self.rng.gen_bool(self.config.spawn.point_cache_odds) {
            if let Some(event) = self.spawn_point_cache() {
                self.spawned.push(event);
            }
        }
    }

    /// Give every species with a living critter its longevity bonus.
    ///
    /// At most one award per turn count: a repeat call before the count
    /// moves on does nothing and returns false.
    pub fn award_bonuses(&mut self) -> bool {
        if self.last_bonus_turn == Some(self.turn_count) {
            trace!(turn = self.turn_count, "Bonuses already awarded for this turn");
            return false;
        }
        self.last_bonus_turn = Some(self.turn_count);

        let amount = self.config.scoring.longevity_bonus;
        let survivors = self.scoreboard.survivors();
        for species in &survivors {
            self.scoreboard.add_bonus(*species, amount);
        }

        info!(
            turn = self.turn_count,
            species = survivors.len(),
            amount,
            "Longevity bonuses awarded"
        );
        true
    }

    /// Drop a point cache on a random empty cell.
    ///
    /// Returns `None` when the grid is full or the roster has no neutral
    /// species; neither is an error.
    pub fn spawn_point_cache(&mut self) -> Option<MoveEvent> {
        let species = self.roster.point_cache()?;
        let cells = self.grid.empty_cells();
        let pos = match cells.choose(&mut self.rng) {
            Some(pos) => *pos,
            None => {
                trace!(turn = self.turn_count, "Grid full, no point cache spawned");
                return None;
            }
        };

        match self.insert_critter(species, pos) {
            Ok(id) => {
                debug!(critter_id = %id, pos = %pos, turn = self.turn_count, "Point cache spawned");
                Some(MoveEvent::spawned(id, pos))
            }
            Err(err) => {
                debug!(error = %err, "Point cache spawn skipped");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::event::Outcome;
    use crate::simulation::Engine;
    use critter_core::{EngineConfig, Position, WorldConfig};

    fn config(odds: f64) -> EngineConfig {
        let mut config = EngineConfig {
            initial_population: 0,
            world: WorldConfig {
                width: 3,
                height: 3,
            },
            ..Default::default()
        };
        config.spawn.point_cache_odds = odds;
        config
    }

    #[test]
    fn test_spawn_point_cache_on_empty_cell() {
        let mut engine = Engine::with_builtins(config(0.0)).unwrap();
        let event = engine.spawn_point_cache().unwrap();

        assert_eq!(event.outcome, Outcome::Spawned);
        assert_eq!(event.from, event.to);
        let id = event.critter.unwrap();
        assert_eq!(engine.occupant(event.to), Some(id));
        assert_eq!(engine.display_glyph(id), Some('$'));
        assert_eq!(engine.health(id), 50);
        // Neutral species are not scored
        assert_eq!(engine.scoreboard().population(), 0);
        assert!(engine.is_consistent());
    }

    #[test]
    fn test_spawn_on_full_grid_is_skipped() {
        let mut engine = Engine::with_builtins(config(1.0)).unwrap();
        let stone = engine.species_id("Stone").unwrap();
        for y in 0..3 {
            for x in 0..3 {
                engine.place_critter(stone, Position::new(x, y)).unwrap();
            }
        }
        assert!(engine.spawn_point_cache().is_none());
        assert_eq!(engine.population(), 9);
    }

    #[test]
    fn test_certain_odds_spawn_every_tick() {
        let mut engine = Engine::with_builtins(config(1.0)).unwrap();
        let stone = engine.species_id("Stone").unwrap();
        engine.place_critter(stone, Position::new(0, 0)).unwrap();

        let event = engine.tick();
        assert_eq!(event.outcome, Outcome::Stayed);
        let spawned = engine.take_spawned();
        assert_eq!(spawned.len(), 1);
        assert_eq!(engine.population(), 2);
        assert!(engine.take_spawned().is_empty());
    }

    #[test]
    fn test_award_bonuses_is_guarded_per_turn() {
        let mut engine = Engine::with_builtins(config(0.0)).unwrap();
        let stone = engine.species_id("Stone").unwrap();
        let lion = engine.species_id("Lion").unwrap();
        engine.place_critter(stone, Position::new(0, 0)).unwrap();

        assert!(engine.award_bonuses());
        assert!(!engine.award_bonuses());
        assert_eq!(engine.scoreboard().get(stone).unwrap().bonus, 10);
        assert_eq!(engine.scoreboard().get(lion).unwrap().bonus, 0);

        engine.tick();
        assert!(engine.award_bonuses());
        assert_eq!(engine.scoreboard().get(stone).unwrap().bonus, 20);
    }
}
