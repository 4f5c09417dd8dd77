//! Per-species score keeping.

use crate::SpeciesId;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

/// Counters for one species
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesState {
    /// Critters currently on the grid
    pub alive: u32,
    /// Critters of other species this species has removed in combat
    pub kills: u32,
    /// Longevity bonuses and point cache rewards
    pub bonus: u32,
}

impl SpeciesState {
    pub fn total(&self) -> u32 {
        self.alive + self.kills + self.bonus
    }
}

/// A species row on the scoreboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesScore {
    pub name: String,
    /// Ships with the engine, as opposed to a user-supplied species
    pub builtin: bool,
    pub state: SpeciesState,
}

impl fmt::Display for SpeciesScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.state;
        write!(
            f,
            "{}: {} + {} + {} = {}",
            self.name,
            s.alive,
            s.kills,
            s.bonus,
            s.total()
        )
    }
}

/// Scores for every competing species
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    rows: BTreeMap<SpeciesId, SpeciesScore>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a species with zeroed counters. Re-registering keeps existing counts.
    pub fn register(&mut self, id: SpeciesId, name: impl Into<String>, builtin: bool) {
        self.rows.entry(id).or_insert_with(|| SpeciesScore {
            name: name.into(),
            builtin,
            state: SpeciesState::default(),
        });
    }

    pub fn contains(&self, id: SpeciesId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn get(&self, id: SpeciesId) -> Option<&SpeciesState> {
        self.rows.get(&id).map(|row| &row.state)
    }

    pub fn by_name(&self, name: &str) -> Option<&SpeciesState> {
        self.rows
            .values()
            .find(|row| row.name == name)
            .map(|row| &row.state)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &SpeciesScore)> + '_ {
        self.rows.iter().map(|(id, row)| (*id, row))
    }

    pub fn record_birth(&mut self, id: SpeciesId) {
        if let Some(row) = self.rows.get_mut(&id) {
            row.state.alive += 1;
        }
    }

    pub fn record_death(&mut self, id: SpeciesId) {
        if let Some(row) = self.rows.get_mut(&id) {
            row.state.alive = row.state.alive.saturating_sub(1);
        }
    }

    pub fn record_kill(&mut self, id: SpeciesId) {
        if let Some(row) = self.rows.get_mut(&id) {
            row.state.kills += 1;
        }
    }

    pub fn add_bonus(&mut self, id: SpeciesId, amount: u32) {
        if let Some(row) = self.rows.get_mut(&id) {
            row.state.bonus += amount;
        }
    }

    /// Species with at least one living critter
    pub fn survivors(&self) -> Vec<SpeciesId> {
        self.rows
            .iter()
            .filter(|(_, row)| row.state.alive > 0)
            .map(|(id, _)| *id)
            .collect()
    }

    /// User species first, then built-in ones, each group by name
    pub fn display_order(&self) -> Vec<&SpeciesScore> {
        let mut rows: Vec<&SpeciesScore> = self.rows.values().collect();
        rows.sort_by(|a, b| (a.builtin, &a.name).cmp(&(b.builtin, &b.name)));
        rows
    }

    /// Highest total first; ties broken by name
    pub fn standings(&self) -> Vec<&SpeciesScore> {
        let mut rows: Vec<&SpeciesScore> = self.rows.values().collect();
        rows.sort_by_key(|row| (Reverse(row.state.total()), row.name.clone()));
        rows
    }

    /// Sum of living critters over all species
    pub fn population(&self) -> u32 {
        self.rows.values().map(|row| row.state.alive).sum()
    }
}
