//! Species behaviors for the critter simulation.
//!
//! This crate provides the seam between the engine and the creatures it runs:
//! - The [`Behavior`] capability trait every species implements
//! - The per-tick [`View`] a critter decides from
//! - The [`Roster`] of registered species and their factories
//! - A set of built-in species, including the neutral point cache

pub mod builtin;
pub mod context;
pub mod roster;

pub use builtin::{Bear, Lion, Mouse, PointCache, Stone, POINT_CACHE};
pub use context::{Action, Encounter, Neighbor, View};
pub use roster::{Roster, SpeciesEntry};

use critter_core::Rgb;
use rand::RngCore;

/// Per-critter behavior.
///
/// One boxed instance exists for every critter on the grid, so implementations
/// may keep private state between ticks.
pub trait Behavior: Send {
    /// Character drawn for this critter
    fn glyph(&self) -> char;

    /// Color at full health
    fn color(&self) -> Rgb;

    /// Damage dealt to a defender on each attack
    fn strength(&self) -> i32;

    /// Choose this tick's action
    fn decide(&mut self, view: &View, rng: &mut dyn RngCore) -> Action;

    /// Called when the chosen move runs into `other`
    fn on_encounter(&mut self, _view: &View, _other: &Neighbor) -> Encounter {
        Encounter::Fight
    }

    /// Called once, just before the critter is removed from the grid
    fn on_death(&mut self, _view: &View) {}
}
