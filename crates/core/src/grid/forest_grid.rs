//! Rectangular grid of optional tree cells with von Neumann neighborhoods.

use crate::core_types::cell::Cell;
use crate::core_types::error::{Result, WildfireError};
use crate::core_types::spatial::Position;
use crate::grid::terrain::validate_dimensions;

/// Fixed-size `height x width` array of tree slots, row-major (`[y * width + x]`).
///
/// A slot may be empty (no tree). Edges do not wrap, so border cells have fewer than
/// four neighbors. A cell's position always equals its slot.
#[derive(Debug, Clone)]
pub struct Grid {
    height: usize,
    width: usize,
    slots: Vec<Option<Cell>>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if either dimension is zero.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        validate_dimensions(height, width)?;
        Ok(Self {
            height,
            width,
            slots: vec![None; height * width],
        })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of slots (occupied or not).
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot index of a position.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` if the position lies outside the grid.
    pub fn index_of(&self, position: Position) -> Result<usize> {
        if position.x >= self.width || position.y >= self.height {
            return Err(WildfireError::InvalidPosition {
                x: position.x,
                y: position.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(position.y * self.width + position.x)
    }

    /// Position of a slot index. Caller guarantees `slot < slot_count()`.
    #[inline]
    pub fn position_of(&self, slot: usize) -> Position {
        Position::new(slot % self.width, slot / self.width)
    }

    /// Place a tree in the slot matching its position.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` if the position is off-grid, `InvalidConfiguration` if the slot
    /// already holds a tree.
    pub fn place(&mut self, cell: Cell) -> Result<usize> {
        let position = cell.position();
        let slot = self.index_of(position)?;
        if self.slots[slot].is_some() {
            return Err(WildfireError::invalid_config(
                "position",
                format!("{position} already holds a tree"),
            ));
        }
        self.slots[slot] = Some(cell);
        Ok(slot)
    }

    /// Tree at a position, `None` for an empty slot.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` if the position is off-grid.
    pub fn get(&self, position: Position) -> Result<Option<&Cell>> {
        let slot = self.index_of(position)?;
        Ok(self.slots[slot].as_ref())
    }

    #[inline]
    pub(crate) fn cell(&self, slot: usize) -> Option<&Cell> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, slot: usize) -> Option<&mut Cell> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// In-bounds orthogonal neighbor slots of `slot`, in west, east, north, south order.
    /// Empty slots are included; callers filter occupancy.
    pub(crate) fn neighbor_slots(&self, slot: usize) -> [Option<usize>; 4] {
        let Position { x, y } = self.position_of(slot);
        [
            (x > 0).then(|| slot - 1),
            (x + 1 < self.width).then(|| slot + 1),
            (y > 0).then(|| slot - self.width),
            (y + 1 < self.height).then(|| slot + self.width),
        ]
    }

    /// Occupied orthogonal neighbors of a position (no diagonals, no wrapping).
    ///
    /// Order is stable: west, east, north, south.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` if the position is off-grid.
    pub fn neighbors(&self, position: Position) -> Result<Vec<&Cell>> {
        let slot = self.index_of(position)?;
        Ok(self
            .neighbor_slots(slot)
            .into_iter()
            .flatten()
            .filter_map(|n| self.cell(n))
            .collect())
    }

    /// All placed trees in slot order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.slots.iter().flatten()
    }

    /// Number of placed trees.
    pub fn occupied(&self) -> usize {
        self.cells().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_grid(height: usize, width: usize) -> Grid {
        let mut grid = Grid::new(height, width).expect("valid dimensions");
        for y in 0..height {
            for x in 0..width {
                grid.place(Cell::new(Position::new(x, y), 1000.0))
                    .expect("free slot");
            }
        }
        grid
    }

    #[test]
    fn neighbor_counts_follow_boundaries() {
        let grid = full_grid(4, 5);
        let count = |x, y| grid.neighbors(Position::new(x, y)).expect("in bounds").len();

        // Corners
        assert_eq!(count(0, 0), 2);
        assert_eq!(count(4, 0), 2);
        assert_eq!(count(0, 3), 2);
        assert_eq!(count(4, 3), 2);

        // Non-corner edges
        assert_eq!(count(2, 0), 3);
        assert_eq!(count(0, 1), 3);
        assert_eq!(count(4, 2), 3);
        assert_eq!(count(1, 3), 3);

        // Interior
        assert_eq!(count(2, 1), 4);
        assert_eq!(count(3, 2), 4);
    }

    #[test]
    fn neighbors_are_orthogonal_and_ordered() {
        let grid = full_grid(3, 3);
        let positions: Vec<Position> = grid
            .neighbors(Position::new(1, 1))
            .expect("in bounds")
            .iter()
            .map(|c| c.position())
            .collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );
    }

    #[test]
    fn empty_slots_are_skipped() {
        let mut grid = Grid::new(3, 3).expect("valid");
        grid.place(Cell::new(Position::new(1, 1), 900.0)).expect("free");
        grid.place(Cell::new(Position::new(1, 0), 900.0)).expect("free");

        let around_center = grid.neighbors(Position::new(1, 1)).expect("in bounds");
        assert_eq!(around_center.len(), 1);
        assert_eq!(around_center[0].position(), Position::new(1, 0));

        // Empty slots still resolve neighbors
        assert_eq!(grid.neighbors(Position::new(0, 0)).expect("in bounds").len(), 1);
        assert_eq!(grid.occupied(), 2);
    }

    #[test]
    fn slot_and_position_agree() {
        let grid = full_grid(3, 4);
        for cell in grid.cells() {
            let slot = grid.index_of(cell.position()).expect("in bounds");
            assert_eq!(grid.position_of(slot), cell.position());
        }
    }

    #[test]
    fn out_of_bounds_queries_fail() {
        let grid = full_grid(2, 2);
        assert!(matches!(
            grid.neighbors(Position::new(2, 0)),
            Err(WildfireError::InvalidPosition { x: 2, y: 0, .. })
        ));
        assert!(grid.get(Position::new(0, 2)).is_err());
    }

    #[test]
    fn double_placement_is_rejected() {
        let mut grid = Grid::new(2, 2).expect("valid");
        grid.place(Cell::new(Position::new(0, 0), 700.0)).expect("free");
        assert!(grid.place(Cell::new(Position::new(0, 0), 800.0)).is_err());
        assert_eq!(grid.get(Position::new(0, 0)).expect("in bounds").map(Cell::elevation), Some(700.0));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(Grid::new(0, 3).is_err());
        assert!(Grid::new(3, 0).is_err());
    }
}
