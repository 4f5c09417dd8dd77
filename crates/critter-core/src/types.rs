//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a critter instance.
///
/// Ids are handed out in creation order and never reused by an engine, so
/// sorting by id gives a stable acting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CritterId(pub u64);

impl fmt::Display for CritterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a species in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpeciesId(pub usize);

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy)
    }

    /// Whether this position lies on a `width` x `height` grid
    pub fn within(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width && self.y < height
    }

    /// Chebyshev distance, the number of king moves between two cells
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction for movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }

    /// Direction whose delta is `(dx, dy)`, if it is a unit step
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        Direction::all()
            .into_iter()
            .find(|d| d.to_delta() == (dx, dy))
    }
}

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fade this color toward white as health drops.
    ///
    /// Each channel becomes `255 - health * (255 - v) / max_health` with
    /// integer division; `health` is clamped to `[0, max_health]`. Full health
    /// returns the color unchanged and zero health returns white.
    pub fn faded(&self, health: i32, max_health: i32) -> Rgb {
        if max_health <= 0 {
            return *self;
        }
        let health = health.clamp(0, max_health);
        let fade = |v: u8| -> u8 {
            let v = v as i32;
            (255 - health * (255 - v) / max_health) as u8
        };
        Rgb::new(fade(self.r), fade(self.g), fade(self.b))
    }

    /// `#RRGGBB` form
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(0, 0).within(10, 5));
        assert!(Position::new(9, 4).within(10, 5));
        assert!(!Position::new(10, 4).within(10, 5));
        assert!(!Position::new(-1, 0).within(10, 5));
        assert!(!Position::new(3, 5).within(10, 5));
    }

    #[test]
    fn test_step_and_distance() {
        let pos = Position::new(2, 3);
        assert_eq!(pos.step(Direction::South), Position::new(2, 4));
        assert_eq!(pos.step(Direction::NorthWest), Position::new(1, 2));
        assert_eq!(pos.chebyshev_distance(&Position::new(5, 4)), 3);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::North.to_delta(), (0, -1));
        assert_eq!(Direction::South.to_delta(), (0, 1));
        assert_eq!(Direction::East.to_delta(), (1, 0));
        assert_eq!(Direction::West.to_delta(), (-1, 0));
        assert_eq!(Direction::from_delta(1, 1), Some(Direction::SouthEast));
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn test_fade_boundaries() {
        let base = Rgb::new(200, 40, 0);
        assert_eq!(base.faded(50, 50), base);
        assert_eq!(base.faded(0, 50), Rgb::WHITE);
        assert_eq!(base.faded(-7, 50), Rgb::WHITE);
        assert_eq!(base.faded(90, 50), base);
    }

    #[test]
    fn test_fade_midpoint() {
        // 255 - 25 * 255 / 50 = 128 for a black channel
        assert_eq!(Rgb::BLACK.faded(25, 50), Rgb::new(128, 128, 128));
        // 255 - 10 * (255 - 200) / 50 = 255 - 11 = 244
        assert_eq!(Rgb::new(200, 200, 200).faded(10, 50).r, 244);
    }

    #[test]
    fn test_hex() {
        assert_eq!(Rgb::new(255, 0, 171).to_hex(), "#FF00AB");
    }
}
