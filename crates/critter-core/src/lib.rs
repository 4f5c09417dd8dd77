//! Core types and utilities for the critter simulation.

pub mod config;
pub mod error;
pub mod pace;
pub mod score;
pub mod types;

pub use config::*;
pub use error::{Error, Result};
pub use pace::Pace;
pub use score::{Scoreboard, SpeciesScore, SpeciesState};
pub use types::*;
