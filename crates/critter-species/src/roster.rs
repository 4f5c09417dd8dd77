//! Registered species and how to make new members of each.

use crate::builtin::{Bear, Lion, Mouse, PointCache, Stone, POINT_CACHE};
use crate::Behavior;
use critter_core::{Error, Result, SpeciesId};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type Factory = Arc<dyn Fn() -> Box<dyn Behavior> + Send + Sync>;

/// A species known to the engine
#[derive(Clone)]
pub struct SpeciesEntry {
    pub id: SpeciesId,
    pub name: String,
    /// Ships with the engine rather than being supplied by a user
    pub builtin: bool,
    /// Takes no part in scoring and is collected rather than fought
    pub neutral: bool,
    factory: Factory,
}

impl SpeciesEntry {
    /// Create the behavior for a new member of this species
    pub fn spawn(&self) -> Box<dyn Behavior> {
        (self.factory)()
    }
}

impl fmt::Debug for SpeciesEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeciesEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("builtin", &self.builtin)
            .field("neutral", &self.neutral)
            .finish()
    }
}

/// The set of species a simulation runs with
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<SpeciesEntry>,
}

impl Roster {
    /// An empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Stone, Mouse, Lion and Bear, plus the point cache
    pub fn with_builtins() -> Self {
        let mut roster = Self::new();
        roster.push("Stone", true, false, Arc::new(|| Box::new(Stone) as Box<dyn Behavior>));
        roster.push("Mouse", true, false, Arc::new(|| Box::new(Mouse) as Box<dyn Behavior>));
        roster.push("Lion", true, false, Arc::new(|| Box::new(Lion) as Box<dyn Behavior>));
        roster.push("Bear", true, false, Arc::new(|| Box::new(Bear::default()) as Box<dyn Behavior>));
        roster.push_point_cache();
        roster
    }

    /// A roster holding only the point cache, ready for user species
    pub fn with_point_cache() -> Self {
        let mut roster = Self::new();
        roster.push_point_cache();
        roster
    }

    /// Register a user species. Names must be unique.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Result<SpeciesId>
    where
        F: Fn() -> Box<dyn Behavior> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.by_name(&name).is_some() {
            return Err(Error::InvalidConfig(format!(
                "species '{}' is already registered",
                name
            )));
        }
        let id = self.push(name, false, false, Arc::new(factory));
        debug!(species = ?id, "Registered species");
        Ok(id)
    }

    fn push_point_cache(&mut self) -> SpeciesId {
        self.push(
            POINT_CACHE,
            true,
            true,
            Arc::new(|| Box::new(PointCache) as Box<dyn Behavior>),
        )
    }

    fn push(&mut self, name: impl Into<String>, builtin: bool, neutral: bool, factory: Factory) -> SpeciesId {
        let id = SpeciesId(self.entries.len());
        self.entries.push(SpeciesEntry {
            id,
            name: name.into(),
            builtin,
            neutral,
            factory,
        });
        id
    }

    pub fn get(&self, id: SpeciesId) -> Option<&SpeciesEntry> {
        self.entries.get(id.0)
    }

    pub fn by_name(&self, name: &str) -> Option<&SpeciesEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn is_neutral(&self, id: SpeciesId) -> bool {
        self.get(id).map(|entry| entry.neutral).unwrap_or(false)
    }

    /// The species spawned as point caches, if the roster has one
    pub fn point_cache(&self) -> Option<SpeciesId> {
        self.entries.iter().find(|entry| entry.neutral).map(|entry| entry.id)
    }

    /// Species that score and are seeded on reset
    pub fn competitors(&self) -> impl Iterator<Item = &SpeciesEntry> + '_ {
        self.entries.iter().filter(|entry| !entry.neutral)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
