//! What a critter sees when it acts, and what it can ask for.

use critter_core::{CritterId, Direction, Position, SpeciesId};
use serde::{Deserialize, Serialize};

/// Actions that a critter can take on its tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Stay,
    /// Step into the adjacent cell; an occupied cell starts an encounter
    Move(Direction),
}

/// How an actor responds when its target cell is occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encounter {
    Fight,
    Yield,
}

/// Another critter in one of the eight surrounding cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: CritterId,
    pub species: SpeciesId,
    pub position: Position,
    pub direction: Direction,
    pub health: i32,
    /// Same species as the viewer
    pub kin: bool,
    /// Point caches and other non-competing pickups
    pub neutral: bool,
}

impl Neighbor {
    /// A competing critter of another species
    pub fn is_enemy(&self) -> bool {
        !self.kin && !self.neutral
    }
}

/// Owned snapshot of a critter's surroundings, built fresh for every tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    pub id: CritterId,
    pub species: SpeciesId,
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    pub width: i32,
    pub height: i32,
    pub turn: u64,
    pub neighbors: Vec<Neighbor>,
}

impl View {
    pub fn neighbor(&self, direction: Direction) -> Option<&Neighbor> {
        self.neighbors.iter().find(|n| n.direction == direction)
    }

    pub fn in_bounds(&self, direction: Direction) -> bool {
        self.position.step(direction).within(self.width, self.height)
    }

    /// In-bounds directions with nobody in the way
    pub fn open_directions(&self) -> Vec<Direction> {
        Direction::all()
            .into_iter()
            .filter(|d| self.in_bounds(*d) && self.neighbor(*d).is_none())
            .collect()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Neighbor> + '_ {
        self.neighbors.iter().filter(|n| n.is_enemy())
    }

    pub fn caches(&self) -> impl Iterator<Item = &Neighbor> + '_ {
        self.neighbors.iter().filter(|n| n.neutral)
    }

    pub fn is_wounded(&self) -> bool {
        self.health < self.max_health
    }
}
