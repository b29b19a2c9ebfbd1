//! Robot entity and its placement, turning and motion transitions.

use robot_table_core::{
    BlockReason, Blocked, CellCoord, Facing, RobotId, RobotSnapshot, Step, Turn,
};

use crate::grid::OccupancyGrid;

/// A single directional robot.
///
/// The robot does not own the grid it stands on. Every transition borrows
/// the grid for its duration so the occupancy records stay in step with the
/// robot's own position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Robot {
    id: RobotId,
    cell: Option<CellCoord>,
    facing: Facing,
}

impl Robot {
    pub(crate) const fn new(id: RobotId) -> Self {
        Self {
            id,
            cell: None,
            facing: Facing::North,
        }
    }

    /// Identifier allocated by the table.
    #[must_use]
    pub const fn id(&self) -> RobotId {
        self.id
    }

    /// Cell currently held, or `None` before the first placement.
    #[must_use]
    pub const fn cell(&self) -> Option<CellCoord> {
        self.cell
    }

    /// Direction the robot is facing.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Captures the robot's state, if it stands on the table.
    #[must_use]
    pub fn snapshot(&self) -> Option<RobotSnapshot> {
        self.cell.map(|cell| RobotSnapshot {
            id: self.id,
            cell,
            facing: self.facing,
        })
    }

    /// Puts the robot on `cell` with the given facing.
    ///
    /// Relocating an already placed robot frees its previous cell first. The
    /// robot is left untouched when the target is outside the grid or held by
    /// another robot.
    pub fn place(
        &mut self,
        grid: &mut OccupancyGrid,
        cell: CellCoord,
        facing: Facing,
    ) -> Result<(), Blocked> {
        check_target(grid, cell)?;
        if let Some(previous) = self.cell.filter(|previous| grid.is_valid(*previous)) {
            grid.vacate(previous);
        }
        grid.occupy(self.id, cell);
        self.cell = Some(cell);
        self.facing = facing;
        Ok(())
    }

    /// Rotates a quarter turn in place and returns the new facing.
    pub fn turn(&mut self, turn: Turn) -> Facing {
        self.facing = self.facing.rotated(turn.steps());
        self.facing
    }

    /// Advances one cell in the current facing.
    ///
    /// The attempted cell is reported whether or not the step succeeds. A
    /// robot that has not been placed cannot move and reports its own
    /// missing position as out of bounds.
    pub fn step_forward(&mut self, grid: &mut OccupancyGrid) -> Result<Step, Blocked> {
        let Some(from) = self.cell else {
            return Err(Blocked {
                cell: CellCoord::new(-1, -1),
                reason: BlockReason::OutOfBounds,
            });
        };
        let to = from.step(self.facing);
        check_target(grid, to)?;
        grid.vacate(from);
        grid.occupy(self.id, to);
        self.cell = Some(to);
        Ok(Step { from, to })
    }
}

/// Rejects cells outside the grid first, then cells held by any robot.
pub(crate) fn check_target(grid: &OccupancyGrid, cell: CellCoord) -> Result<(), Blocked> {
    if !grid.is_valid(cell) {
        Err(Blocked {
            cell,
            reason: BlockReason::OutOfBounds,
        })
    } else if grid.is_occupied(cell) {
        Err(Blocked {
            cell,
            reason: BlockReason::Occupied,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robot_table_core::TableSize;

    fn grid() -> OccupancyGrid {
        OccupancyGrid::new(TableSize::new(5, 5).expect("non-zero size"))
    }

    #[test]
    fn place_sets_position_and_facing() {
        let mut grid = grid();
        let mut robot = Robot::new(RobotId::new(1));
        let cell = CellCoord::new(3, 2);

        robot.place(&mut grid, cell, Facing::South).expect("free cell");

        assert_eq!(robot.cell(), Some(cell));
        assert_eq!(robot.facing(), Facing::South);
        assert_eq!(grid.occupant(cell), Some(robot.id()));
    }

    #[test]
    fn place_rejects_invalid_and_occupied_cells() {
        let mut grid = grid();
        let mut robot = Robot::new(RobotId::new(1));
        grid.occupy(RobotId::new(2), CellCoord::new(1, 1));

        assert_eq!(
            robot.place(&mut grid, CellCoord::new(5, 0), Facing::North),
            Err(Blocked {
                cell: CellCoord::new(5, 0),
                reason: BlockReason::OutOfBounds,
            })
        );
        assert_eq!(
            robot.place(&mut grid, CellCoord::new(1, 1), Facing::North),
            Err(Blocked {
                cell: CellCoord::new(1, 1),
                reason: BlockReason::Occupied,
            })
        );
        assert_eq!(robot.cell(), None);
        assert_eq!(robot.snapshot(), None);
    }

    #[test]
    fn relocation_frees_previous_cell() {
        let mut grid = grid();
        let mut robot = Robot::new(RobotId::new(1));
        robot
            .place(&mut grid, CellCoord::new(0, 0), Facing::North)
            .expect("free cell");
        robot
            .place(&mut grid, CellCoord::new(4, 4), Facing::West)
            .expect("free cell");

        assert!(!grid.is_occupied(CellCoord::new(0, 0)));
        assert_eq!(grid.occupant(CellCoord::new(4, 4)), Some(robot.id()));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn turning_never_touches_the_grid() {
        let mut grid = grid();
        let mut robot = Robot::new(RobotId::new(1));
        robot
            .place(&mut grid, CellCoord::new(2, 2), Facing::North)
            .expect("free cell");

        assert_eq!(robot.turn(Turn::Left), Facing::West);
        assert_eq!(robot.turn(Turn::Left), Facing::South);
        assert_eq!(robot.turn(Turn::Right), Facing::West);
        assert_eq!(grid.occupant(CellCoord::new(2, 2)), Some(robot.id()));
    }

    #[test]
    fn step_reports_target_on_success_and_failure() {
        let mut grid = grid();
        let mut robot = Robot::new(RobotId::new(1));
        robot
            .place(&mut grid, CellCoord::new(0, 3), Facing::North)
            .expect("free cell");

        assert_eq!(
            robot.step_forward(&mut grid),
            Ok(Step {
                from: CellCoord::new(0, 3),
                to: CellCoord::new(0, 4),
            })
        );
        assert_eq!(
            robot.step_forward(&mut grid),
            Err(Blocked {
                cell: CellCoord::new(0, 5),
                reason: BlockReason::OutOfBounds,
            })
        );
        assert_eq!(robot.cell(), Some(CellCoord::new(0, 4)));
        assert!(!grid.is_occupied(CellCoord::new(0, 3)));
    }

    #[test]
    fn step_into_another_robot_is_blocked() {
        let mut grid = grid();
        let mut robot = Robot::new(RobotId::new(1));
        robot
            .place(&mut grid, CellCoord::new(1, 1), Facing::East)
            .expect("free cell");
        grid.occupy(RobotId::new(2), CellCoord::new(2, 1));

        assert_eq!(
            robot.step_forward(&mut grid),
            Err(Blocked {
                cell: CellCoord::new(2, 1),
                reason: BlockReason::Occupied,
            })
        );
        assert_eq!(robot.cell(), Some(CellCoord::new(1, 1)));
    }

    #[test]
    fn unplaced_robot_cannot_step() {
        let mut grid = grid();
        let mut robot = Robot::new(RobotId::new(1));
        assert!(robot.step_forward(&mut grid).is_err());
        assert!(grid.is_empty());
    }
}
