#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the robot table simulator.
//!
//! This crate defines the value types that connect the authoritative table,
//! the command interpreter and the adapters. The table mutates robots and
//! hands out [`RobotSnapshot`] and [`TableSnapshot`] copies, the interpreter
//! turns every processed command line into an [`Outcome`], and adapters
//! decide how outcomes and [`Report`] values are presented.

use std::{fmt, num::NonZeroU32, str::FromStr};

use serde::{Deserialize, Serialize};

/// Cardinal facings a robot can hold, in clockwise order starting at north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Facing toward increasing `y`.
    North,
    /// Facing toward increasing `x`.
    East,
    /// Facing toward decreasing `y`.
    South,
    /// Facing toward decreasing `x`.
    West,
}

impl Facing {
    /// Every facing in clockwise order, indexed by [`Facing::ordinal`].
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Position of the facing in the clockwise order (north is 0).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Looks up a facing by ordinal, wrapping modulo four.
    #[must_use]
    pub const fn from_ordinal(ordinal: i32) -> Self {
        Self::ALL[ordinal.rem_euclid(4) as usize]
    }

    /// Returns the facing reached after rotating by `steps` quarter turns.
    ///
    /// Positive steps rotate clockwise, negative steps counter-clockwise.
    #[must_use]
    pub const fn rotated(self, steps: i32) -> Self {
        Self::from_ordinal(self.ordinal() as i32 + steps)
    }

    /// Unit offset travelled by a single forward step.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    /// Upper-case word used by the command language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "NORTH",
            Self::East => "EAST",
            Self::South => "SOUTH",
            Self::West => "WEST",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name one of the four facings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownFacing(pub String);

impl fmt::Display for UnknownFacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown facing '{}'", self.0)
    }
}

impl std::error::Error for UnknownFacing {}

impl FromStr for Facing {
    type Err = UnknownFacing;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|facing| facing.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownFacing(value.to_owned()))
    }
}

/// Quarter turn requested by the `LEFT` and `RIGHT` commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// Counter-clockwise quarter turn.
    Left,
    /// Clockwise quarter turn.
    Right,
}

impl Turn {
    /// Signed number of clockwise quarter turns.
    #[must_use]
    pub const fn steps(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Location of a single table cell.
///
/// Coordinates are signed so that a step beyond the south or west edge can
/// still be described, e.g. when reporting a rejected motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: i64,
    y: i64,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Zero-based column index, growing eastward.
    #[must_use]
    pub const fn x(&self) -> i64 {
        self.x
    }

    /// Zero-based row index, growing northward.
    #[must_use]
    pub const fn y(&self) -> i64 {
        self.y
    }

    /// Cell reached by a single step in the provided facing.
    #[must_use]
    pub const fn step(self, facing: Facing) -> Self {
        let (dx, dy) = facing.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Dimensions of a table, both strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableSize {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl TableSize {
    /// Builds a size from raw dimensions, rejecting zero on either axis.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width.get()
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height.get()
    }

    /// Reports whether the cell lies inside the table.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        (0..i64::from(self.width())).contains(&cell.x())
            && (0..i64::from(self.height())).contains(&cell.y())
    }
}

impl Default for TableSize {
    fn default() -> Self {
        const FIVE: NonZeroU32 = match NonZeroU32::new(5) {
            Some(value) => value,
            None => unreachable!(),
        };
        Self {
            width: FIVE,
            height: FIVE,
        }
    }
}

/// Unique identifier assigned to a robot by its table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RobotId(u64);

impl RobotId {
    /// Creates a new robot identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable copy of a robot's state used for queries and outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RobotSnapshot {
    /// Identifier allocated to the robot by the table.
    pub id: RobotId,
    /// Cell currently occupied by the robot.
    pub cell: CellCoord,
    /// Direction the robot is facing.
    pub facing: Facing,
}

/// Read-only summary of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Number of robots registered on the table.
    pub robot_count: usize,
    /// Robot currently selected on the table, if any.
    pub active: Option<RobotSnapshot>,
}

/// Payload handed to the report observer by the `REPORT` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Report {
    /// Single-robot mode reports the active robot alone.
    Robot(RobotSnapshot),
    /// Multiple-robot mode reports the whole table.
    Table(TableSnapshot),
}

/// Reasons a placement or motion may be rejected by the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockReason {
    /// The target lies outside the table.
    OutOfBounds,
    /// The target already holds another robot.
    Occupied,
}

/// A rejected placement or motion together with the cell that was attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blocked {
    /// Cell the robot attempted to enter.
    pub cell: CellCoord,
    /// Specific reason the attempt failed.
    pub reason: BlockReason,
}

/// A completed single-cell motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    /// Cell the robot occupied before moving.
    pub from: CellCoord,
    /// Cell the robot occupies after moving.
    pub to: CellCoord,
}

/// Decides whether `PLACE` relocates the active robot or adds another one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// A single robot is driven; `PLACE` relocates it once it exists.
    #[default]
    Single,
    /// Every `PLACE` adds an independent robot.
    Multiple,
}

/// Severity class of an outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// The command could not be executed.
    Error,
    /// The command was understood but the table rejected it.
    Warning,
    /// The command completed.
    Done,
}

/// Result of processing one command line, with the parameters it concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// The line was not a recognised command.
    InvalidCommand,
    /// A robot command arrived while no robot was selected.
    NoActiveRobot,
    /// `ROBOT` named an identifier that was never registered.
    NotOnTable {
        /// Identifier requested by the command.
        robot: RobotId,
    },
    /// The target cell lies outside the table.
    PositionInvalid {
        /// Cell the command attempted to use.
        cell: CellCoord,
    },
    /// The target cell already holds another robot.
    PositionOccupied {
        /// Cell the command attempted to use.
        cell: CellCoord,
    },
    /// A first robot was added and selected.
    PlacedAndActivated {
        /// Robot that was added.
        robot: RobotSnapshot,
    },
    /// Another robot was added without changing the selection.
    Placed {
        /// Robot that was added.
        robot: RobotSnapshot,
    },
    /// The active robot was moved to a new cell and facing.
    Relocated {
        /// State of the robot after relocation.
        robot: RobotSnapshot,
    },
    /// The active robot advanced a single cell.
    Moved {
        /// Robot that moved.
        robot: RobotId,
        /// Cell the robot left.
        from: CellCoord,
        /// Cell the robot entered.
        to: CellCoord,
    },
    /// The active robot rotated in place.
    Turned {
        /// Robot that turned.
        robot: RobotId,
        /// Facing after the rotation.
        facing: Facing,
    },
    /// A registered robot became active.
    Activated {
        /// Robot that was selected.
        robot: RobotId,
    },
    /// The report observer received a snapshot.
    Reported,
}

impl OutcomeKind {
    /// Classifies the outcome as error, warning or success.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::InvalidCommand | Self::NoActiveRobot | Self::NotOnTable { .. } => {
                Severity::Error
            }
            Self::PositionInvalid { .. } | Self::PositionOccupied { .. } => Severity::Warning,
            Self::PlacedAndActivated { .. }
            | Self::Placed { .. }
            | Self::Relocated { .. }
            | Self::Moved { .. }
            | Self::Turned { .. }
            | Self::Activated { .. }
            | Self::Reported => Severity::Done,
        }
    }

    /// Numeric code used by earlier front-ends to tag outcomes.
    ///
    /// Errors are negative, warnings are at or below -100 and successes are
    /// positive.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidCommand => -1,
            Self::NoActiveRobot => -2,
            Self::NotOnTable { .. } => -3,
            Self::PositionInvalid { .. } => -100,
            Self::PositionOccupied { .. } => -101,
            Self::PlacedAndActivated { .. } => 100,
            Self::Placed { .. } => 101,
            Self::Relocated { .. } => 102,
            Self::Moved { .. } => 200,
            Self::Turned { .. } => 300,
            Self::Activated { .. } => 400,
            Self::Reported => 1,
        }
    }

    /// Converts a rejected placement or motion into the matching warning.
    #[must_use]
    pub const fn from_blocked(blocked: Blocked) -> Self {
        match blocked.reason {
            BlockReason::OutOfBounds => Self::PositionInvalid { cell: blocked.cell },
            BlockReason::Occupied => Self::PositionOccupied { cell: blocked.cell },
        }
    }
}

/// Structured record emitted for every non-blank command line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Normalised command text. `ROBOT` and `PLACE` lines are reduced to
    /// their keyword; the arguments live in [`Outcome::kind`].
    pub command: String,
    /// Active robot at the time the outcome was produced.
    pub active: Option<RobotSnapshot>,
    /// What happened, with the relevant parameters.
    pub kind: OutcomeKind,
}

impl Outcome {
    /// Shorthand for the severity of [`Outcome::kind`].
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.kind.severity()
    }
}
