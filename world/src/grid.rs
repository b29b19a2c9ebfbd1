//! Occupancy bookkeeping for the table surface.

use std::collections::BTreeMap;

use robot_table_core::{CellCoord, RobotId, TableSize};

/// Records which robot, if any, stands on each cell of the table.
///
/// Only occupied cells are stored, so memory follows the robot count rather
/// than the table area. The grid applies no policy of its own: callers
/// validate cells and check occupancy before writing. Writes to cells outside
/// the bounds are ignored.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    size: TableSize,
    cells: BTreeMap<CellCoord, RobotId>,
}

impl OccupancyGrid {
    /// Creates an empty grid covering the provided dimensions.
    #[must_use]
    pub fn new(size: TableSize) -> Self {
        Self {
            size,
            cells: BTreeMap::new(),
        }
    }

    /// Dimensions covered by the grid.
    #[must_use]
    pub const fn size(&self) -> TableSize {
        self.size
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub fn is_valid(&self, cell: CellCoord) -> bool {
        self.size.contains(cell)
    }

    /// Reports whether some robot is recorded at the cell.
    #[must_use]
    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Returns the robot recorded at the cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<RobotId> {
        self.cells.get(&cell).copied()
    }

    /// Records `occupant` at the cell, replacing any previous record.
    pub fn occupy(&mut self, occupant: RobotId, cell: CellCoord) {
        if self.is_valid(cell) {
            let _ = self.cells.insert(cell, occupant);
        }
    }

    /// Removes any record at the cell.
    pub fn vacate(&mut self, cell: CellCoord) {
        let _ = self.cells.remove(&cell);
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over occupied cells ordered by column, then row.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, RobotId)> + '_ {
        self.cells.iter().map(|(cell, id)| (*cell, *id))
    }
}
