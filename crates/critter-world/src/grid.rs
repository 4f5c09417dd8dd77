//! 2D occupancy grid for the world.

use critter_core::{CritterId, Error, Position, Result, WorldConfig};
use serde::{Deserialize, Serialize};

/// A bounded 2D grid where each cell holds at most one critter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Option<CritterId>>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            cells: vec![None; size],
        }
    }

    /// Create an empty grid from world configuration
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.width, config.height)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.within(self.width, self.height)
    }

    /// Critter at `pos`; off-grid positions read as empty
    pub fn occupant(&self, pos: Position) -> Option<CritterId> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.occupant(pos).is_none()
    }

    /// Put `id` on an empty cell
    pub fn place(&mut self, id: CritterId, pos: Position) -> Result<()> {
        let index = self.checked_index(pos)?;
        if let Some(occupant) = self.cells[index] {
            return Err(Error::OccupiedCell { pos, occupant });
        }
        self.cells[index] = Some(id);
        Ok(())
    }

    /// Clear a cell, returning whoever was there
    pub fn vacate(&mut self, pos: Position) -> Result<Option<CritterId>> {
        let index = self.checked_index(pos)?;
        Ok(self.cells[index].take())
    }

    /// Move the occupant of `from` to `to`. Both cells are checked before
    /// anything is written.
    pub fn relocate(&mut self, from: Position, to: Position) -> Result<()> {
        let src = self.checked_index(from)?;
        let dst = self.checked_index(to)?;
        if src == dst {
            return Ok(());
        }
        let id = match self.cells[src] {
            Some(id) => id,
            None => return Ok(()),
        };
        if let Some(occupant) = self.cells[dst] {
            return Err(Error::OccupiedCell { pos: to, occupant });
        }
        self.cells[src] = None;
        self.cells[dst] = Some(id);
        Ok(())
    }

    /// Every in-bounds position around `pos` within `radius`, excluding `pos`
    pub fn neighbors(&self, pos: Position, radius: i32) -> Vec<(Position, Option<CritterId>)> {
        let mut neighbors = Vec::new();

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx == 0 && dy == 0 {
                    continue;
                }

                let neighbor_pos = pos.add(dx, dy);
                if self.in_bounds(neighbor_pos) {
                    neighbors.push((neighbor_pos, self.occupant(neighbor_pos)));
                }
            }
        }

        neighbors
    }

    /// Positions with no occupant, in row-major order
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| self.index_to_pos(i))
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    fn checked_index(&self, pos: Position) -> Result<usize> {
        self.index(pos).ok_or(Error::OutOfBounds(pos))
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<CritterId>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 8);
        assert_eq!(grid.width, 10);
        assert_eq!(grid.height, 8);
        assert_eq!(grid.cell_count(), 80);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.empty_cells().len(), 80);
    }

    #[test]
    fn test_place_and_vacate() {
        let mut grid = Grid::new(4, 4);
        let pos = Position::new(1, 2);
        grid.place(CritterId(1), pos).unwrap();
        assert_eq!(grid.occupant(pos), Some(CritterId(1)));

        let err = grid.place(CritterId(2), pos).unwrap_err();
        assert_eq!(
            err,
            Error::OccupiedCell {
                pos,
                occupant: CritterId(1)
            }
        );
        assert_eq!(grid.occupant(pos), Some(CritterId(1)));

        assert_eq!(grid.vacate(pos).unwrap(), Some(CritterId(1)));
        assert_eq!(grid.vacate(pos).unwrap(), None);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(4, 4);
        let outside = Position::new(4, 0);
        assert_eq!(grid.occupant(outside), None);
        assert!(!grid.is_empty(outside));
        assert_eq!(grid.place(CritterId(1), outside), Err(Error::OutOfBounds(outside)));
        assert_eq!(grid.vacate(Position::new(-1, 0)), Err(Error::OutOfBounds(Position::new(-1, 0))));
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_relocate_is_all_or_nothing() {
        let mut grid = Grid::new(4, 4);
        let a = Position::new(0, 0);
        let b = Position::new(1, 0);
        grid.place(CritterId(1), a).unwrap();
        grid.place(CritterId(2), b).unwrap();

        assert!(grid.relocate(a, b).is_err());
        assert!(grid.relocate(a, Position::new(0, 9)).is_err());
        assert_eq!(grid.occupant(a), Some(CritterId(1)));
        assert_eq!(grid.occupant(b), Some(CritterId(2)));

        grid.relocate(a, Position::new(0, 1)).unwrap();
        assert_eq!(grid.occupant(a), None);
        assert_eq!(grid.occupant(Position::new(0, 1)), Some(CritterId(1)));
    }

    #[test]
    fn test_neighbors_clip_at_edges() {
        let grid = Grid::new(10, 10);
        assert_eq!(grid.neighbors(Position::new(5, 5), 1).len(), 8);
        assert_eq!(grid.neighbors(Position::new(0, 0), 1).len(), 3);
        assert_eq!(grid.neighbors(Position::new(9, 5), 1).len(), 5);
    }

    #[test]
    fn test_full_grid() {
        let mut grid = Grid::new(2, 1);
        grid.place(CritterId(1), Position::new(0, 0)).unwrap();
        assert!(!grid.is_full());
        grid.place(CritterId(2), Position::new(1, 0)).unwrap();
        assert!(grid.is_full());
        assert!(grid.empty_cells().is_empty());
    }
}
