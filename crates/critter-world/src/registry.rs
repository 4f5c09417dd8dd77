//! Live critters keyed by id.

use crate::critter::Critter;
use critter_core::{CritterId, Error, Position, Result, SpeciesId};
use critter_species::Behavior;
use std::collections::BTreeMap;

/// Owns every living critter. Iteration is in ascending id order, which is
/// also creation order.
#[derive(Debug)]
pub struct Registry {
    critters: BTreeMap<CritterId, Critter>,
    next_id: u64,
    default_health: i32,
}

impl Registry {
    pub fn new(default_health: i32) -> Self {
        Self {
            critters: BTreeMap::new(),
            next_id: 0,
            default_health,
        }
    }

    /// Create a critter at full health and return its id. The caller is
    /// responsible for the matching grid cell.
    pub fn create(
        &mut self,
        species: SpeciesId,
        position: Position,
        behavior: Box<dyn Behavior>,
        turn: u64,
    ) -> CritterId {
        let id = CritterId(self.next_id);
        self.next_id += 1;
        let critter = Critter::new(id, species, position, self.default_health, behavior, turn);
        self.critters.insert(id, critter);
        id
    }

    /// Id the next `create` will hand out
    pub fn peek_next_id(&self) -> CritterId {
        CritterId(self.next_id)
    }

    pub fn remove(&mut self, id: CritterId) -> Option<Critter> {
        self.critters.remove(&id)
    }

    pub fn get(&self, id: CritterId) -> Option<&Critter> {
        self.critters.get(&id)
    }

    pub fn get_mut(&mut self, id: CritterId) -> Option<&mut Critter> {
        self.critters.get_mut(&id)
    }

    pub fn contains(&self, id: CritterId) -> bool {
        self.critters.contains_key(&id)
    }

    pub fn position(&self, id: CritterId) -> Option<Position> {
        self.critters.get(&id).map(|c| c.position)
    }

    /// Current health; unknown ids read as full health
    pub fn health(&self, id: CritterId) -> i32 {
        self.critters
            .get(&id)
            .map(|c| c.health)
            .unwrap_or(self.default_health)
    }

    /// Overwrite health, clamping at zero. Returns the stored value.
    pub fn set_health(&mut self, id: CritterId, value: i32) -> Result<i32> {
        let critter = self
            .critters
            .get_mut(&id)
            .ok_or(Error::UnknownCritter(id))?;
        critter.health = value.max(0);
        Ok(critter.health)
    }

    pub fn default_health(&self) -> i32 {
        self.default_health
    }

    /// Live ids in acting order
    pub fn ids(&self) -> Vec<CritterId> {
        self.critters.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Critter> + '_ {
        self.critters.values()
    }

    pub fn count_of(&self, species: SpeciesId) -> usize {
        self.critters.values().filter(|c| c.species == species).count()
    }

    pub fn len(&self) -> usize {
        self.critters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.critters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critter_species::{Mouse, Stone};

    #[test]
    fn test_ids_follow_creation_order() {
        let mut registry = Registry::new(50);
        let a = registry.create(SpeciesId(1), Position::new(3, 3), Box::new(Mouse), 0);
        let b = registry.create(SpeciesId(0), Position::new(0, 0), Box::new(Stone), 0);
        assert!(a < b);
        assert_eq!(registry.ids(), vec![a, b]);
        assert_eq!(registry.peek_next_id(), CritterId(2));

        registry.remove(a);
        assert_eq!(registry.ids(), vec![b]);
        let c = registry.create(SpeciesId(1), Position::new(3, 3), Box::new(Mouse), 4);
        assert_eq!(c, CritterId(2));
    }

    #[test]
    fn test_health_defaults_and_clamping() {
        let mut registry = Registry::new(50);
        let id = registry.create(SpeciesId(0), Position::new(0, 0), Box::new(Stone), 0);
        assert_eq!(registry.health(id), 50);
        assert_eq!(registry.health(CritterId(99)), 50);

        assert_eq!(registry.set_health(id, 12).unwrap(), 12);
        assert_eq!(registry.set_health(id, -5).unwrap(), 0);
        assert_eq!(
            registry.set_health(CritterId(99), 1),
            Err(Error::UnknownCritter(CritterId(99)))
        );
    }

    #[test]
    fn test_species_counts() {
        let mut registry = Registry::new(50);
        registry.create(SpeciesId(0), Position::new(0, 0), Box::new(Stone), 0);
        registry.create(SpeciesId(0), Position::new(1, 0), Box::new(Stone), 0);
        registry.create(SpeciesId(1), Position::new(2, 0), Box::new(Mouse), 0);
        assert_eq!(registry.count_of(SpeciesId(0)), 2);
        assert_eq!(registry.count_of(SpeciesId(1)), 1);
        assert_eq!(registry.len(), 3);
    }
}
