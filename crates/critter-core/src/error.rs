//! Error types for the simulation.

use crate::{CritterId, Position};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("Cell {pos} is already occupied by critter {occupant}")]
    OccupiedCell { pos: Position, occupant: CritterId },

    #[error("No living critter with id {0}")]
    UnknownCritter(CritterId),

    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    #[error("Requested {requested} critters but only {available} cells are free")]
    CapacityExceeded { requested: usize, available: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
