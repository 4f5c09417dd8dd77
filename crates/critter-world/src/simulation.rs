//! Turn engine: stepping, movement and encounter resolution.

use crate::critter::{Critter, CritterData};
use crate::event::{MoveEvent, Outcome};
use crate::grid::Grid;
use crate::registry::Registry;
use critter_core::{
    CritterId, Direction, EngineConfig, Error, Position, Result, Rgb, Scoreboard, SpeciesId,
    SpeciesScore,
};
use critter_species::{Action, Encounter, Neighbor, Roster, View};
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info, instrument, trace, warn};

/// Glyph drawn for an empty cell
pub const EMPTY_GLYPH: char = '.';

/// The whole simulation state, owned in one place.
///
/// `R` is the random source used for layout, spawning and every behavior
/// decision. With the same seed and roster, the same calls produce the same
/// events.
pub struct Engine<R: RngCore = ChaCha8Rng> {
    pub(crate) grid: Grid,
    pub(crate) registry: Registry,
    pub(crate) scoreboard: Scoreboard,
    pub(crate) roster: Roster,
    pub(crate) config: EngineConfig,
    pub(crate) rng: R,
    pub(crate) turn_count: u64,
    /// Critters still due to act in the current round
    pub(crate) round: VecDeque<CritterId>,
    pub(crate) last_bonus_turn: Option<u64>,
    /// Spawn events not yet handed to the caller
    pub(crate) spawned: Vec<MoveEvent>,
}

impl Engine<ChaCha8Rng> {
    /// Engine seeded from `config.seed`, populated with
    /// `config.initial_population` critters of every competing species
    pub fn new(config: EngineConfig, roster: Roster) -> Result<Self> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, roster, rng)
    }

    /// Engine running the built-in species
    pub fn with_builtins(config: EngineConfig) -> Result<Self> {
        Self::new(config, Roster::with_builtins())
    }
}

impl<R: RngCore> Engine<R> {
    pub fn with_rng(config: EngineConfig, roster: Roster, rng: R) -> Result<Self> {
        config.validate()?;

        let mut engine = Self {
            grid: Grid::from_config(&config.world),
            registry: Registry::new(config.max_health),
            scoreboard: Scoreboard::new(),
            roster,
            rng,
            turn_count: 0,
            round: VecDeque::new(),
            last_bonus_turn: None,
            spawned: Vec::new(),
            config,
        };

        engine.reset(engine.config.initial_population)?;
        Ok(engine)
    }

    /// Throw away all state and lay out `population` critters of every
    /// competing species on random empty cells.
    ///
    /// Fails without touching anything if the grid cannot hold them.
    #[instrument(skip(self))]
    pub fn reset(&mut self, population: usize) -> Result<()> {
        let species: Vec<SpeciesId> = self.roster.competitors().map(|entry| entry.id).collect();
        let requested = population.saturating_mul(species.len());
        let available = self.config.world.cell_count();
        if requested > available {
            return Err(Error::CapacityExceeded {
                requested,
                available,
            });
        }

        self.grid = Grid::from_config(&self.config.world);
        self.registry = Registry::new(self.config.max_health);
        self.scoreboard = Scoreboard::new();
        for entry in self.roster.competitors() {
            self.scoreboard
                .register(entry.id, entry.name.clone(), entry.builtin);
        }
        self.turn_count = 0;
        self.round.clear();
        self.last_bonus_turn = None;
        self.spawned.clear();

        let mut cells = self.grid.empty_cells();
        let (chosen, _) = cells.partial_shuffle(&mut self.rng, requested);
        let chosen = chosen.to_vec();

        // Round-robin so no species always acts first
        let lineup = &species;
        let order = (0..population).flat_map(move |_| lineup.iter().copied());
        for (kind, pos) in order.zip(chosen) {
            self.insert_critter(kind, pos)?;
        }

        info!(
            population = self.registry.len(),
            species = species.len(),
            width = self.grid.width,
            height = self.grid.height,
            "World reset"
        );
        Ok(())
    }

    /// Advance by one critter action.
    ///
    /// Returns an idle event, without advancing the turn count, when no
    /// competing critter is alive.
    pub fn tick(&mut self) -> MoveEvent {
        match self.next_actor() {
            Some(id) => self.step(id),
            None => MoveEvent::idle(),
        }
    }

    /// Finish the current round, or play a whole new one if none is in
    /// progress. Every competitor alive when the round started acts once
    /// unless it dies first. Spawn events are interleaved after the tick that
    /// caused them.
    #[instrument(skip(self), fields(turn = self.turn_count))]
    pub fn turn(&mut self) -> Vec<MoveEvent> {
        let registry = &self.registry;
        self.round.retain(|id| registry.contains(*id));
        if self.round.is_empty() {
            self.round = self.acting_order();
        }

        let mut events = self.take_spawned();
        while let Some(id) = self.pop_live() {
            events.push(self.step(id));
            events.append(&mut self.spawned);
        }

        debug!(
            events = events.len(),
            population = self.registry.len(),
            turn_count = self.turn_count,
            "Round complete"
        );
        events
    }

    /// Play `rounds` full rounds and log a summary
    pub fn run(&mut self, rounds: u64) -> Summary {
        for round in 0..rounds {
            if self.scoreboard.population() == 0 {
                info!(round, "No competitors left, stopping early");
                break;
            }
            self.turn();
        }

        let summary = self.summary();
        info!(
            turn_count = summary.turn_count,
            population = summary.population,
            leader = summary.scores.first().map(|s| s.name.as_str()).unwrap_or("none"),
            "Run complete"
        );
        summary
    }

    /// Spawn events produced by `tick` since the last call
    pub fn take_spawned(&mut self) -> Vec<MoveEvent> {
        std::mem::take(&mut self.spawned)
    }

    fn pop_live(&mut self) -> Option<CritterId> {
        while let Some(id) = self.round.pop_front() {
            if self.registry.contains(id) {
                return Some(id);
            }
        }
        None
    }

    fn next_actor(&mut self) -> Option<CritterId> {
        if let Some(id) = self.pop_live() {
            return Some(id);
        }
        self.round = self.acting_order();
        self.pop_live()
    }

    /// Live competitors in ascending id order. Neutral critters never act.
    fn acting_order(&self) -> VecDeque<CritterId> {
        self.registry
            .iter()
            .filter(|c| !self.roster.is_neutral(c.species))
            .map(|c| c.id)
            .collect()
    }

    fn step(&mut self, id: CritterId) -> MoveEvent {
        let event = self.act(id);
        self.turn_count += 1;
        self.on_turn_advanced();
        event
    }

    fn act(&mut self, id: CritterId) -> MoveEvent {
        let view = match self.view_of(id) {
            Some(view) => view,
            None => return MoveEvent::idle(),
        };
        let from = view.position;

        let action = match self.registry.get_mut(id) {
            Some(critter) => {
                critter.tick();
                critter.behavior.decide(&view, &mut self.rng)
            }
            None => return MoveEvent::idle(),
        };

        let direction = match action {
            Action::Stay => return MoveEvent::new(id, from, from, Outcome::Stayed),
            Action::Move(direction) => direction,
        };

        let to = from.step(direction);
        if !self.grid.in_bounds(to) {
            trace!(critter_id = %id, to = %to, "Move blocked by the edge of the world");
            return MoveEvent::new(id, from, from, Outcome::Blocked);
        }

        match self.grid.occupant(to) {
            None => match self.shift(id, to) {
                Ok(_) => MoveEvent::new(id, from, to, Outcome::Moved),
                Err(err) => {
                    warn!(critter_id = %id, error = %err, "Move rejected");
                    MoveEvent::new(id, from, from, Outcome::Blocked)
                }
            },
            Some(target) => self.encounter(id, &view, target, to),
        }
    }

    fn encounter(&mut self, id: CritterId, view: &View, target: CritterId, at: Position) -> MoveEvent {
        let from = view.position;
        let blocked = MoveEvent::new(id, from, from, Outcome::Blocked);

        let neighbor = match view.neighbors.iter().find(|n| n.id == target) {
            Some(neighbor) => neighbor.clone(),
            None => return blocked,
        };

        let (response, strength) = match self.registry.get_mut(id) {
            Some(critter) => (
                critter.behavior.on_encounter(view, &neighbor),
                critter.behavior.strength(),
            ),
            None => return blocked,
        };
        if response == Encounter::Yield {
            trace!(critter_id = %id, target = %target, "Backed off");
            return blocked;
        }

        if neighbor.neutral {
            self.remove_critter(target);
            self.scoreboard
                .add_bonus(view.species, self.config.scoring.point_cache_reward);
            let to = self.advance(id, from, at);
            debug!(
                critter_id = %id,
                species = ?view.species,
                reward = self.config.scoring.point_cache_reward,
                turn = self.turn_count,
                "Point cache collected"
            );
            return MoveEvent::new(id, from, to, Outcome::Collected { target, at });
        }

        self.strike(id, view, neighbor, strength)
    }

    /// Combat: the defender loses the attacker's strength in health and is
    /// removed at zero.
    fn strike(&mut self, id: CritterId, view: &View, defender: Neighbor, strength: i32) -> MoveEvent {
        let from = view.position;
        let target = defender.id;
        let at = defender.position;

        let died = match self.registry.get_mut(target) {
            Some(critter) => critter.take_damage(strength),
            None => return MoveEvent::new(id, from, from, Outcome::Blocked),
        };
        if let Some(attacker) = self.registry.get_mut(id) {
            attacker.record_damage_dealt(strength);
            if died {
                attacker.record_kill();
            }
        }

        if !died {
            let health = self.registry.health(target);
            trace!(critter_id = %id, target = %target, health, "Attack landed");
            return MoveEvent::new(id, from, from, Outcome::Attacked { target, at, health });
        }

        self.remove_critter(target);
        self.scoreboard.record_kill(view.species);
        let to = self.advance(id, from, at);
        debug!(
            critter_id = %id,
            target = %target,
            killer = ?view.species,
            victim = ?defender.species,
            turn = self.turn_count,
            "Critter killed"
        );
        MoveEvent::new(id, from, to, Outcome::Killed { target, at })
    }

    /// Step into a freshly emptied cell when configured to
    fn advance(&mut self, id: CritterId, from: Position, to: Position) -> Position {
        if !self.config.advance_on_kill {
            return from;
        }
        match self.shift(id, to) {
            Ok(_) => to,
            Err(err) => {
                warn!(critter_id = %id, error = %err, "Could not advance after encounter");
                from
            }
        }
    }

    /// Move `id` to `to` in both grid and registry. Returns the old position.
    fn shift(&mut self, id: CritterId, to: Position) -> Result<Position> {
        let from = self.registry.position(id).ok_or(Error::UnknownCritter(id))?;
        self.grid.relocate(from, to)?;
        if let Some(critter) = self.registry.get_mut(id) {
            critter.move_to(to);
        }
        Ok(from)
    }

    /// Create a critter on an empty cell. Nothing changes on error.
    pub(crate) fn insert_critter(&mut self, species: SpeciesId, pos: Position) -> Result<CritterId> {
        let behavior = self
            .roster
            .get(species)
            .map(|entry| entry.spawn())
            .ok_or_else(|| Error::UnknownSpecies(format!("{:?}", species)))?;

        let id = self.registry.peek_next_id();
        self.grid.place(id, pos)?;
        let created = self
            .registry
            .create(species, pos, behavior, self.turn_count);
        debug_assert_eq!(id, created);
        self.scoreboard.record_birth(species);
        Ok(id)
    }

    /// Remove a critter from grid and registry, running its death hook
    fn remove_critter(&mut self, id: CritterId) -> Option<Critter> {
        if let Some(view) = self.view_of(id) {
            if let Some(critter) = self.registry.get_mut(id) {
                critter.behavior.on_death(&view);
            }
        }

        let critter = self.registry.remove(id)?;
        if let Err(err) = self.grid.vacate(critter.position) {
            warn!(critter_id = %id, error = %err, "Removed critter had no cell");
        }
        self.scoreboard.record_death(critter.species);
        Some(critter)
    }

    /// Snapshot of what `id` can see
    pub fn view_of(&self, id: CritterId) -> Option<View> {
        let critter = self.registry.get(id)?;
        let here = critter.position;

        let neighbors = self
            .grid
            .neighbors(here, 1)
            .into_iter()
            .filter_map(|(pos, occupant)| {
                let other = self.registry.get(occupant?)?;
                let direction = Direction::from_delta(pos.x - here.x, pos.y - here.y)?;
                Some(Neighbor {
                    id: other.id,
                    species: other.species,
                    position: pos,
                    direction,
                    health: other.health,
                    kin: other.species == critter.species,
                    neutral: self.roster.is_neutral(other.species),
                })
            })
            .collect();

        Some(View {
            id,
            species: critter.species,
            position: here,
            health: critter.health,
            max_health: self.config.max_health,
            width: self.grid.width,
            height: self.grid.height,
            turn: self.turn_count,
            neighbors,
        })
    }

    /// Create a critter of `species` at `pos`
    pub fn place_critter(&mut self, species: SpeciesId, pos: Position) -> Result<CritterId> {
        let id = self.insert_critter(species, pos)?;
        debug!(critter_id = %id, species = ?species, pos = %pos, "Critter placed");
        Ok(id)
    }

    /// Move a critter directly, outside of its own turn. Rejected without
    /// side effects when `to` is off the grid or taken by someone else.
    pub fn move_critter(&mut self, id: CritterId, to: Position) -> Result<MoveEvent> {
        if !self.registry.contains(id) {
            return Err(Error::UnknownCritter(id));
        }
        if !self.grid.in_bounds(to) {
            return Err(Error::OutOfBounds(to));
        }
        let from = self.shift(id, to)?;
        let outcome = if from == to { Outcome::Stayed } else { Outcome::Moved };
        Ok(MoveEvent::new(id, from, to, outcome))
    }

    /// Set a critter's health, clamped at zero. A critter set to zero is
    /// removed without anyone being credited with the kill.
    pub fn set_health(&mut self, id: CritterId, value: i32) -> Result<i32> {
        let health = self.registry.set_health(id, value)?;
        if health == 0 {
            self.remove_critter(id);
            debug!(critter_id = %id, "Critter removed at zero health");
        }
        Ok(health)
    }

    pub fn health(&self, id: CritterId) -> i32 {
        self.registry.health(id)
    }

    pub fn turn_count(&self) -> u64 {
        self.turn_count
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn species_id(&self, name: &str) -> Option<SpeciesId> {
        self.roster.by_name(name).map(|entry| entry.id)
    }

    pub fn occupant(&self, pos: Position) -> Option<CritterId> {
        self.grid.occupant(pos)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Copy of the occupancy grid
    pub fn grid_snapshot(&self) -> Grid {
        self.grid.clone()
    }

    pub fn critter(&self, id: CritterId) -> Option<CritterData> {
        self.registry.get(id).map(CritterData::from)
    }

    pub fn critters(&self) -> Vec<CritterData> {
        self.registry.iter().map(CritterData::from).collect()
    }

    pub fn population(&self) -> usize {
        self.registry.len()
    }

    /// Critters still to act before the current round ends
    pub fn round_remaining(&self) -> usize {
        self.round
            .iter()
            .filter(|id| self.registry.contains(**id))
            .count()
    }

    pub fn display_glyph(&self, id: CritterId) -> Option<char> {
        self.registry.get(id).map(|c| c.behavior.glyph())
    }

    /// Base color faded toward white by lost health
    pub fn display_color(&self, id: CritterId) -> Option<Rgb> {
        self.registry
            .get(id)
            .map(|c| c.behavior.color().faded(c.health, self.config.max_health))
    }

    /// The grid as text, one row per line
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity(self.grid.cell_count() + self.grid.height as usize);
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                let glyph = self
                    .grid
                    .occupant(Position::new(x, y))
                    .and_then(|id| self.display_glyph(id))
                    .unwrap_or(EMPTY_GLYPH);
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }

    /// Grid, registry and scoreboard agree with each other
    pub fn is_consistent(&self) -> bool {
        if self.grid.occupied_count() != self.registry.len() {
            return false;
        }
        let placed = self
            .registry
            .iter()
            .all(|c| self.grid.occupant(c.position) == Some(c.id));
        let counted = self.scoreboard.iter().all(|(species, row)| {
            row.state.alive as usize == self.registry.count_of(species)
        });
        placed && counted
    }

    pub fn summary(&self) -> Summary {
        Summary {
            turn_count: self.turn_count,
            population: self.registry.len(),
            scores: self.scoreboard.standings().into_iter().cloned().collect(),
            survivors: self.critters(),
        }
    }
}

/// End-of-run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub turn_count: u64,
    pub population: usize,
    /// Best total first
    pub scores: Vec<SpeciesScore>,
    pub survivors: Vec<CritterData>,
}
