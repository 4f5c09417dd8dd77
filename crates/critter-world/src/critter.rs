//! Critter state and management.

use critter_core::{CritterId, Position, SpeciesId};
use critter_species::Behavior;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A critter in the simulation
pub struct Critter {
    pub id: CritterId,
    pub species: SpeciesId,
    pub position: Position,
    pub health: i32,
    /// Ticks this critter has acted
    pub age: u64,
    /// Turn count at creation
    pub birth_turn: u64,
    pub kills: u32,
    pub damage_dealt: i64,
    pub damage_received: i64,
    pub behavior: Box<dyn Behavior>,
}

impl Critter {
    pub fn new(
        id: CritterId,
        species: SpeciesId,
        position: Position,
        health: i32,
        behavior: Box<dyn Behavior>,
        birth_turn: u64,
    ) -> Self {
        Self {
            id,
            species,
            position,
            health,
            age: 0,
            birth_turn,
            kills: 0,
            damage_dealt: 0,
            damage_received: 0,
            behavior,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Lose `amount` health, never going below zero. Returns true if this was
    /// the fatal blow.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let amount = amount.max(0);
        self.health = (self.health - amount).max(0);
        self.damage_received += amount as i64;
        !self.is_alive()
    }

    pub fn move_to(&mut self, new_position: Position) {
        self.position = new_position;
    }

    pub fn tick(&mut self) {
        self.age += 1;
    }

    pub fn record_kill(&mut self) {
        self.kills += 1;
    }

    pub fn record_damage_dealt(&mut self, amount: i32) {
        self.damage_dealt += amount.max(0) as i64;
    }
}

impl fmt::Debug for Critter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Critter")
            .field("id", &self.id)
            .field("species", &self.species)
            .field("position", &self.position)
            .field("health", &self.health)
            .field("glyph", &self.behavior.glyph())
            .finish()
    }
}

/// Serializable critter data (without behavior)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritterData {
    pub id: CritterId,
    pub species: SpeciesId,
    pub position: Position,
    pub health: i32,
    pub age: u64,
    pub birth_turn: u64,
    pub kills: u32,
    pub damage_dealt: i64,
    pub damage_received: i64,
    pub glyph: char,
}

impl From<&Critter> for CritterData {
    fn from(critter: &Critter) -> Self {
        Self {
            id: critter.id,
            species: critter.species,
            position: critter.position,
            health: critter.health,
            age: critter.age,
            birth_turn: critter.birth_turn,
            kills: critter.kills,
            damage_dealt: critter.damage_dealt,
            damage_received: critter.damage_received,
            glyph: critter.behavior.glyph(),
        }
    }
}
