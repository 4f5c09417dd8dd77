//! Observable changes, one per unit of engine work.

use critter_core::{CritterId, Position};
use serde::{Deserialize, Serialize};

/// What happened on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Nobody was alive to act
    Idle,
    Stayed,
    Moved,
    /// The move ran off the grid, or the actor backed off an occupied cell
    Blocked,
    /// The defender survived with `health` left
    Attacked {
        target: CritterId,
        at: Position,
        health: i32,
    },
    /// The defender was removed from the grid
    Killed { target: CritterId, at: Position },
    /// A point cache was picked up
    Collected { target: CritterId, at: Position },
    /// A point cache appeared
    Spawned,
}

/// A critter's move from `from` to `to`. Renderers redraw both cells, plus the
/// target of any encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub critter: Option<CritterId>,
    pub from: Position,
    pub to: Position,
    pub outcome: Outcome,
}

impl MoveEvent {
    pub fn new(critter: CritterId, from: Position, to: Position, outcome: Outcome) -> Self {
        Self {
            critter: Some(critter),
            from,
            to,
            outcome,
        }
    }

    /// Nothing could act
    pub fn idle() -> Self {
        Self {
            critter: None,
            from: Position::new(0, 0),
            to: Position::new(0, 0),
            outcome: Outcome::Idle,
        }
    }

    pub fn spawned(critter: CritterId, at: Position) -> Self {
        Self::new(critter, at, at, Outcome::Spawned)
    }

    pub fn is_idle(&self) -> bool {
        self.critter.is_none()
    }

    pub fn moved(&self) -> bool {
        self.from != self.to
    }

    /// Another critter touched by this event, with its cell
    pub fn target(&self) -> Option<(CritterId, Position)> {
        match self.outcome {
            Outcome::Attacked { target, at, .. }
            | Outcome::Killed { target, at }
            | Outcome::Collected { target, at } => Some((target, at)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_event() {
        let event = MoveEvent::idle();
        assert!(event.is_idle());
        assert!(!event.moved());
        assert_eq!(event.target(), None);
    }

    #[test]
    fn test_spawn_event_does_not_move() {
        let event = MoveEvent::spawned(CritterId(3), Position::new(4, 1));
        assert_eq!(event.critter, Some(CritterId(3)));
        assert_eq!(event.from, event.to);
        assert!(!event.moved());
    }

    #[test]
    fn test_event_target() {
        let at = Position::new(1, 1);
        let event = MoveEvent::new(
            CritterId(1),
            Position::new(0, 0),
            Position::new(0, 0),
            Outcome::Attacked {
                target: CritterId(2),
                at,
                health: 10,
            },
        );
        assert_eq!(event.target(), Some((CritterId(2), at)));
    }

    #[test]
    fn test_event_json_shape() {
        let event = MoveEvent::new(
            CritterId(7),
            Position::new(2, 3),
            Position::new(2, 4),
            Outcome::Moved,
        );
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["critter"], 7);
        assert_eq!(json["to"]["y"], 4);
        assert_eq!(json["outcome"], "Moved");
    }
}
