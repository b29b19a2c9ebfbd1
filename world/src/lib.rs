#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative table state for the robot simulator.
//!
//! A [`Table`] owns the occupancy grid and every robot standing on it. Robots
//! are only created through [`Table::add_robot`], identifiers are handed out
//! monotonically and never reused until [`Table::clear`], and the table keeps
//! track of the single active robot that selection-free commands target.

mod grid;
mod robot;

use std::collections::BTreeMap;

use robot_table_core::{
    Blocked, CellCoord, Facing, RobotId, RobotSnapshot, Step, TableSize, TableSnapshot, Turn,
};

pub use grid::OccupancyGrid;
pub use robot::Robot;

/// Bounded surface holding a registry of robots.
#[derive(Clone, Debug)]
pub struct Table {
    grid: OccupancyGrid,
    robots: BTreeMap<RobotId, Robot>,
    active: Option<RobotId>,
    last_robot_id: u64,
}

impl Table {
    /// Creates an empty table with the provided dimensions.
    #[must_use]
    pub fn new(size: TableSize) -> Self {
        Self {
            grid: OccupancyGrid::new(size),
            robots: BTreeMap::new(),
            active: None,
            last_robot_id: 0,
        }
    }

    /// Dimensions of the table.
    #[must_use]
    pub const fn size(&self) -> TableSize {
        self.grid.size()
    }

    /// Reports whether the cell lies on the table.
    #[must_use]
    pub fn is_valid(&self, cell: CellCoord) -> bool {
        self.grid.is_valid(cell)
    }

    /// Reports whether a robot stands on the cell.
    #[must_use]
    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        self.grid.is_occupied(cell)
    }

    /// Adds a new robot at `cell` and returns its state.
    ///
    /// The first robot added to a table without an active robot becomes
    /// active. A rejected cell registers nothing and consumes no identifier.
    pub fn add_robot(&mut self, cell: CellCoord, facing: Facing) -> Result<RobotSnapshot, Blocked> {
        robot::check_target(&self.grid, cell)?;

        self.last_robot_id = self.last_robot_id.saturating_add(1);
        let id = RobotId::new(self.last_robot_id);
        let mut robot = Robot::new(id);
        robot.place(&mut self.grid, cell, facing)?;
        let snapshot = RobotSnapshot { id, cell, facing };
        let _ = self.robots.insert(id, robot);

        if self.active.is_none() {
            self.active = Some(id);
        }
        log::debug!("robot {id} added at ({cell}) facing {facing}");
        Ok(snapshot)
    }

    /// Selects the robot with the provided identifier.
    ///
    /// Returns `None` and keeps the current selection when no such robot is
    /// registered.
    pub fn choose_robot(&mut self, id: RobotId) -> Option<RobotSnapshot> {
        let snapshot = self.robots.get(&id).and_then(Robot::snapshot)?;
        self.active = Some(id);
        log::debug!("robot {id} activated");
        Some(snapshot)
    }

    /// Moves a registered robot to a new cell and facing.
    ///
    /// Returns `None` when the robot is not registered.
    pub fn relocate_robot(
        &mut self,
        id: RobotId,
        cell: CellCoord,
        facing: Facing,
    ) -> Option<Result<RobotSnapshot, Blocked>> {
        let robot = self.robots.get_mut(&id)?;
        let result = robot
            .place(&mut self.grid, cell, facing)
            .map(|()| RobotSnapshot { id, cell, facing });
        if result.is_ok() {
            log::debug!("robot {id} relocated to ({cell}) facing {facing}");
        }
        Some(result)
    }

    /// Rotates a registered robot a quarter turn.
    pub fn turn_robot(&mut self, id: RobotId, turn: Turn) -> Option<Facing> {
        self.robots.get_mut(&id).map(|robot| robot.turn(turn))
    }

    /// Advances a registered robot one cell in its facing.
    pub fn move_robot(&mut self, id: RobotId) -> Option<Result<Step, Blocked>> {
        let robot = self.robots.get_mut(&id)?;
        Some(robot.step_forward(&mut self.grid))
    }

    /// Removes every robot, frees the grid and restarts identifier allocation.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.robots.clear();
        self.active = None;
        self.last_robot_id = 0;
        log::debug!("table cleared");
    }

    /// Looks up a registered robot.
    #[must_use]
    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(&id)
    }

    /// Identifier of the active robot, if any.
    #[must_use]
    pub const fn active_id(&self) -> Option<RobotId> {
        self.active
    }

    /// State of the active robot, if any.
    #[must_use]
    pub fn active(&self) -> Option<RobotSnapshot> {
        self.active
            .and_then(|id| self.robots.get(&id))
            .and_then(Robot::snapshot)
    }

    /// Number of robots registered on the table.
    #[must_use]
    pub fn robot_count(&self) -> usize {
        self.robots.len()
    }

    /// Captures the robot count and the active robot.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            robot_count: self.robot_count(),
            active: self.active(),
        }
    }
}

/// Query functions that provide read-only access to the table state.
pub mod query {
    use robot_table_core::{CellCoord, RobotId, RobotSnapshot, TableSnapshot};

    use super::{Robot, Table};

    /// Captures every robot on the table in identifier order, which is also
    /// the order they were added in.
    #[must_use]
    pub fn robot_view(table: &Table) -> RobotView {
        RobotView {
            snapshots: table.robots.values().filter_map(Robot::snapshot).collect(),
            active: table.active,
        }
    }

    /// Summarises the table for reporting.
    #[must_use]
    pub fn table_snapshot(table: &Table) -> TableSnapshot {
        table.snapshot()
    }

    /// Returns the robot standing on the provided cell, if any.
    #[must_use]
    pub fn occupant(table: &Table, cell: CellCoord) -> Option<RobotId> {
        table.grid.occupant(cell)
    }

    /// Read-only snapshot describing all robots on the table.
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub struct RobotView {
        snapshots: Vec<RobotSnapshot>,
        active: Option<RobotId>,
    }

    impl RobotView {
        /// Iterator over the captured robots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &RobotSnapshot> {
            self.snapshots.iter()
        }

        /// Reports whether the robot was the active one when captured.
        ///
        /// Compares identifiers, so the answer stays valid for copies of a
        /// snapshot.
        #[must_use]
        pub fn is_active(&self, robot: &RobotSnapshot) -> bool {
            self.active == Some(robot.id)
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<RobotSnapshot> {
            self.snapshots
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new(TableSize::new(5, 5).expect("non-zero size"))
    }

    #[test]
    fn first_robot_becomes_active() {
        let mut table = table();
        let first = table
            .add_robot(CellCoord::new(0, 0), Facing::North)
            .expect("free cell");
        let second = table
            .add_robot(CellCoord::new(1, 1), Facing::East)
            .expect("free cell");

        assert_eq!(first.id, RobotId::new(1));
        assert_eq!(second.id, RobotId::new(2));
        assert_eq!(table.active_id(), Some(first.id));
        assert_eq!(table.robot_count(), 2);
    }

    #[test]
    fn rejected_add_registers_nothing() {
        let mut table = table();
        let _ = table
            .add_robot(CellCoord::new(0, 0), Facing::North)
            .expect("free cell");

        assert!(table.add_robot(CellCoord::new(0, 0), Facing::East).is_err());
        assert!(table.add_robot(CellCoord::new(9, 0), Facing::East).is_err());
        assert_eq!(table.robot_count(), 1);

        let next = table
            .add_robot(CellCoord::new(2, 0), Facing::North)
            .expect("free cell");
        assert_eq!(next.id, RobotId::new(2), "rejections consume no identifier");
    }

    #[test]
    fn choose_robot_keeps_selection_on_miss() {
        let mut table = table();
        let _ = table
            .add_robot(CellCoord::new(0, 0), Facing::North)
            .expect("free cell");
        let second = table
            .add_robot(CellCoord::new(1, 0), Facing::North)
            .expect("free cell");

        assert_eq!(table.choose_robot(RobotId::new(7)), None);
        assert_eq!(table.active_id(), Some(RobotId::new(1)));

        assert_eq!(table.choose_robot(second.id), Some(second));
        assert_eq!(table.active_id(), Some(second.id));
    }

    #[test]
    fn clear_resets_identifiers_and_occupancy() {
        let mut table = table();
        let _ = table
            .add_robot(CellCoord::new(0, 0), Facing::North)
            .expect("free cell");
        let _ = table
            .add_robot(CellCoord::new(1, 0), Facing::North)
            .expect("free cell");

        table.clear();

        assert_eq!(table.robot_count(), 0);
        assert_eq!(table.active(), None);
        assert!(!table.is_occupied(CellCoord::new(0, 0)));
        let fresh = table
            .add_robot(CellCoord::new(0, 0), Facing::South)
            .expect("free cell");
        assert_eq!(fresh.id, RobotId::new(1));
        assert_eq!(table.active_id(), Some(fresh.id));
    }

    #[test]
    fn relocate_moves_occupancy() {
        let mut table = table();
        let robot = table
            .add_robot(CellCoord::new(0, 0), Facing::North)
            .expect("free cell");

        let relocated = table
            .relocate_robot(robot.id, CellCoord::new(3, 3), Facing::West)
            .expect("registered robot")
            .expect("free cell");

        assert_eq!(relocated.cell, CellCoord::new(3, 3));
        assert_eq!(query::occupant(&table, CellCoord::new(3, 3)), Some(robot.id));
        assert_eq!(query::occupant(&table, CellCoord::new(0, 0)), None);
        assert!(table
            .relocate_robot(RobotId::new(9), CellCoord::new(1, 1), Facing::West)
            .is_none());
    }

    #[test]
    fn robot_view_marks_active_by_identifier() {
        let mut table = table();
        let first = table
            .add_robot(CellCoord::new(0, 0), Facing::North)
            .expect("free cell");
        let second = table
            .add_robot(CellCoord::new(4, 4), Facing::South)
            .expect("free cell");

        let view = query::robot_view(&table);
        let robots: Vec<_> = view.iter().copied().collect();
        assert_eq!(robots, vec![first, second]);
        assert!(view.is_active(&first));
        assert!(!view.is_active(&second));
        assert_eq!(
            query::table_snapshot(&table),
            TableSnapshot {
                robot_count: 2,
                active: Some(first),
            }
        );
    }

    #[test]
    fn largest_table_accepts_robots() {
        let mut table = Table::new(TableSize::new(u32::MAX, u32::MAX).expect("non-zero size"));
        let robot = table
            .add_robot(CellCoord::new(7, 7), Facing::North)
            .expect("free cell");

        assert_eq!(robot.cell, CellCoord::new(7, 7));
        assert_eq!(query::occupant(&table, robot.cell), Some(robot.id));
        let step = table
            .move_robot(robot.id)
            .expect("registered robot")
            .expect("free cell");
        assert_eq!(step.to, CellCoord::new(7, 8));
    }
}

