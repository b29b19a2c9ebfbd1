//! Grammar of the command language.
//!
//! ```text
//! ROBOT  <n>
//! PLACE  <x>,<y>,<NORTH|SOUTH|EAST|WEST>
//! LEFT | RIGHT | MOVE | REPORT
//! ```

use robot_table_core::{CellCoord, Facing, RobotId, Turn};
use thiserror::Error;

/// Keyword that selects a robot by identifier.
pub const ROBOT_KEYWORD: &str = "ROBOT";
/// Keyword that puts a robot on the table.
pub const PLACE_KEYWORD: &str = "PLACE";

/// A recognised command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `ROBOT <n>`
    Select(RobotId),
    /// `PLACE <x>,<y>,<facing>`
    Place {
        /// Requested cell.
        cell: CellCoord,
        /// Requested facing.
        facing: Facing,
    },
    /// `LEFT` or `RIGHT`
    Turn(Turn),
    /// `MOVE`
    Move,
    /// `REPORT`
    Report,
}

/// Reasons a non-blank line is not a valid command.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// `ROBOT` was not followed by a single non-negative number.
    #[error("expected a robot number after ROBOT, found '{0}'")]
    RobotArguments(String),
    /// `PLACE` was not followed by `x,y,facing`.
    #[error("expected X,Y,FACING after PLACE, found '{0}'")]
    PlaceArguments(String),
    /// The line does not start with a known command.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

impl ParseError {
    /// Reports whether the line started with the `ROBOT` or `PLACE` keyword.
    ///
    /// Such lines are rejected as invalid even when no robot is active.
    #[must_use]
    pub const fn has_keyword(&self) -> bool {
        matches!(self, Self::RobotArguments(_) | Self::PlaceArguments(_))
    }
}

/// Trims surrounding whitespace and upper-cases the line.
#[must_use]
pub fn normalize(line: &str) -> String {
    line.trim().to_uppercase()
}

/// Parses a normalised line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Instruction>, ParseError> {
    if line.is_empty() {
        return Ok(None);
    }

    let (keyword, arguments) = match line.split_once(char::is_whitespace) {
        Some((keyword, arguments)) => (keyword, Some(arguments.trim())),
        None => (line, None),
    };

    let instruction = match (keyword, arguments) {
        (ROBOT_KEYWORD, arguments) => parse_robot(arguments.unwrap_or_default())?,
        (PLACE_KEYWORD, arguments) => parse_place(arguments.unwrap_or_default())?,
        ("LEFT", None) => Instruction::Turn(Turn::Left),
        ("RIGHT", None) => Instruction::Turn(Turn::Right),
        ("MOVE", None) => Instruction::Move,
        ("REPORT", None) => Instruction::Report,
        _ => return Err(ParseError::UnknownCommand(line.to_owned())),
    };
    Ok(Some(instruction))
}

fn parse_robot(arguments: &str) -> Result<Instruction, ParseError> {
    parse_number(arguments)
        .map(|id| Instruction::Select(RobotId::new(id)))
        .ok_or_else(|| ParseError::RobotArguments(arguments.to_owned()))
}

fn parse_place(arguments: &str) -> Result<Instruction, ParseError> {
    let invalid = || ParseError::PlaceArguments(arguments.to_owned());

    let mut fields = arguments.split(',').map(str::trim);
    let (Some(x), Some(y), Some(facing), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(invalid());
    };

    let x = parse_number(x).ok_or_else(invalid)?;
    let y = parse_number(y).ok_or_else(invalid)?;
    let facing = facing.parse::<Facing>().map_err(|_| invalid())?;
    Ok(Instruction::Place {
        cell: CellCoord::new(saturating_coordinate(x), saturating_coordinate(y)),
        facing,
    })
}

/// Parses a run of ASCII digits, saturating at `u64::MAX`.
fn parse_number(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    Some(text.parse::<u64>().unwrap_or(u64::MAX))
}

fn saturating_coordinate(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
