//! Species that ship with the engine.

use crate::context::{Action, Encounter, Neighbor, View};
use crate::Behavior;
use critter_core::Rgb;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Roster name of the neutral pickup
pub const POINT_CACHE: &str = "PointCache";

fn wander(view: &View, rng: &mut dyn RngCore) -> Action {
    view.open_directions()
        .choose(rng)
        .map(|d| Action::Move(*d))
        .unwrap_or(Action::Stay)
}

fn pick<'a>(targets: Vec<&'a Neighbor>, rng: &mut dyn RngCore) -> Option<&'a Neighbor> {
    targets.choose(rng).copied()
}

/// Never moves and never strikes. Others go around it or wear it down.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stone;

impl Behavior for Stone {
    fn glyph(&self) -> char {
        'S'
    }

    fn color(&self) -> Rgb {
        Rgb::new(128, 128, 128)
    }

    fn strength(&self) -> i32 {
        0
    }

    fn decide(&mut self, _view: &View, _rng: &mut dyn RngCore) -> Action {
        Action::Stay
    }
}

/// Random walker. Grabs point caches, never starts a fight.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mouse;

impl Behavior for Mouse {
    fn glyph(&self) -> char {
        'M'
    }

    fn color(&self) -> Rgb {
        Rgb::new(139, 90, 43)
    }

    fn strength(&self) -> i32 {
        2
    }

    fn decide(&mut self, view: &View, rng: &mut dyn RngCore) -> Action {
        if let Some(cache) = pick(view.caches().collect(), rng) {
            return Action::Move(cache.direction);
        }
        wander(view, rng)
    }

    fn on_encounter(&mut self, _view: &View, other: &Neighbor) -> Encounter {
        if other.neutral {
            Encounter::Fight
        } else {
            Encounter::Yield
        }
    }
}

/// Attacks any adjacent critter of another species, otherwise roams.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lion;

impl Behavior for Lion {
    fn glyph(&self) -> char {
        'L'
    }

    fn color(&self) -> Rgb {
        Rgb::new(200, 30, 30)
    }

    fn strength(&self) -> i32 {
        15
    }

    fn decide(&mut self, view: &View, rng: &mut dyn RngCore) -> Action {
        if let Some(prey) = pick(view.enemies().collect(), rng) {
            return Action::Move(prey.direction);
        }
        if let Some(cache) = pick(view.caches().collect(), rng) {
            return Action::Move(cache.direction);
        }
        wander(view, rng)
    }

    fn on_encounter(&mut self, _view: &View, other: &Neighbor) -> Encounter {
        if other.kin {
            Encounter::Yield
        } else {
            Encounter::Fight
        }
    }
}

/// Swipes at whatever is next to it. Its glyph flips between `/` and `\`
/// every time it acts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bear {
    moves: u64,
}

impl Behavior for Bear {
    fn glyph(&self) -> char {
        if self.moves % 2 == 0 {
            '/'
        } else {
            '\\'
        }
    }

    fn color(&self) -> Rgb {
        Rgb::new(40, 90, 200)
    }

    fn strength(&self) -> i32 {
        10
    }

    fn decide(&mut self, view: &View, rng: &mut dyn RngCore) -> Action {
        self.moves += 1;
        let targets: Vec<&Neighbor> = view.neighbors.iter().filter(|n| !n.kin).collect();
        if let Some(target) = pick(targets, rng) {
            return Action::Move(target.direction);
        }
        wander(view, rng)
    }
}

/// Neutral pickup. Sits still until something collects it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointCache;

impl Behavior for PointCache {
    fn glyph(&self) -> char {
        '$'
    }

    fn color(&self) -> Rgb {
        Rgb::new(218, 165, 32)
    }

    fn strength(&self) -> i32 {
        0
    }

    fn decide(&mut self, _view: &View, _rng: &mut dyn RngCore) -> Action {
        Action::Stay
    }

    fn on_encounter(&mut self, _view: &View, _other: &Neighbor) -> Encounter {
        Encounter::Yield
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critter_core::{CritterId, Direction, Position, SpeciesId};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn view_at(position: Position, neighbors: Vec<Neighbor>) -> View {
        View {
            id: CritterId(1),
            species: SpeciesId(0),
            position,
            health: 50,
            max_health: 50,
            width: 10,
            height: 10,
            turn: 0,
            neighbors,
        }
    }

    fn neighbor(from: Position, direction: Direction, kin: bool, neutral: bool) -> Neighbor {
        Neighbor {
            id: CritterId(2),
            species: if kin { SpeciesId(0) } else { SpeciesId(1) },
            position: from.step(direction),
            direction,
            health: 50,
            kin,
            neutral,
        }
    }

    #[test]
    fn test_stone_stays() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let here = Position::new(5, 5);
        assert_eq!(Stone.decide(&view_at(here, vec![]), &mut rng), Action::Stay);

        // Even with an enemy alongside
        let view = view_at(here, vec![neighbor(here, Direction::West, false, false)]);
        assert_eq!(Stone.decide(&view, &mut rng), Action::Stay);
        assert_eq!(Stone.strength(), 0);
    }

    #[test]
    fn test_lion_attacks_enemy_and_spares_kin() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let here = Position::new(5, 5);
        let view = view_at(
            here,
            vec![
                neighbor(here, Direction::North, true, false),
                neighbor(here, Direction::East, false, false),
            ],
        );

        assert_eq!(Lion.decide(&view, &mut rng), Action::Move(Direction::East));

        let kin = neighbor(here, Direction::North, true, false);
        assert_eq!(Lion.on_encounter(&view, &kin), Encounter::Yield);
    }

    #[test]
    fn test_mouse_only_moves_into_open_cells_or_caches() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let corner = Position::new(0, 0);
        let view = view_at(
            corner,
            vec![
                neighbor(corner, Direction::East, false, false),
                neighbor(corner, Direction::SouthEast, false, false),
            ],
        );
        for _ in 0..20 {
            assert_eq!(Mouse.decide(&view, &mut rng), Action::Move(Direction::South));
        }

        let view = view_at(corner, vec![neighbor(corner, Direction::South, false, true)]);
        assert_eq!(Mouse.decide(&view, &mut rng), Action::Move(Direction::South));
    }

    #[test]
    fn test_boxed_in_wanderer_stays() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let corner = Position::new(0, 0);
        let view = view_at(
            corner,
            vec![
                neighbor(corner, Direction::East, true, false),
                neighbor(corner, Direction::South, true, false),
                neighbor(corner, Direction::SouthEast, true, false),
            ],
        );
        assert_eq!(Mouse.decide(&view, &mut rng), Action::Stay);
        assert_eq!(Bear::default().decide(&view, &mut rng), Action::Stay);
    }

    #[test]
    fn test_bear_glyph_alternates() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut bear = Bear::default();
        let view = view_at(Position::new(5, 5), vec![]);
        assert_eq!(bear.glyph(), '/');
        bear.decide(&view, &mut rng);
        assert_eq!(bear.glyph(), '\\');
        bear.decide(&view, &mut rng);
        assert_eq!(bear.glyph(), '/');
    }

    #[test]
    fn test_point_cache_is_inert() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut cache = PointCache;
        let view = view_at(Position::new(5, 5), vec![]);
        assert_eq!(cache.decide(&view, &mut rng), Action::Stay);
        assert_eq!(cache.strength(), 0);
    }
}
