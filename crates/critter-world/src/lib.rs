//! World simulation engine.
//!
//! This module implements the 2D grid where critters live, fight and score.

pub mod critter;
pub mod event;
pub mod grid;
pub mod registry;
pub mod simulation;
mod spawn;

pub use critter::{Critter, CritterData};
pub use event::{MoveEvent, Outcome};
pub use grid::Grid;
pub use registry::Registry;
pub use simulation::{Engine, Summary, EMPTY_GLYPH};
