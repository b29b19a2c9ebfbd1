#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command interpreter that drives robots on a table from a text script.
//!
//! The interpreter reads a script line by line, applies every recognised
//! command to a [`Table`] and hands exactly one [`Outcome`] per non-blank
//! line to an [`OutcomeSink`]. Malformed input never aborts a script: it is
//! reported through the sink like any other result.

pub mod parse;

use robot_table_core::{
    CellCoord, Facing, Mode, Outcome, OutcomeKind, Report, RobotId, RobotSnapshot,
};
use robot_table_world::{Robot, Table};

use self::parse::{Instruction, PLACE_KEYWORD, ROBOT_KEYWORD};

/// Observer that receives the results produced by the interpreter.
pub trait OutcomeSink {
    /// Called once per non-blank line, right after the line was applied.
    fn outcome(&mut self, outcome: &Outcome);

    /// Called when a `REPORT` command runs, before its outcome is delivered.
    fn report(&mut self, report: &Report);
}

impl<S: OutcomeSink + ?Sized> OutcomeSink for &mut S {
    fn outcome(&mut self, outcome: &Outcome) {
        (**self).outcome(outcome);
    }

    fn report(&mut self, report: &Report) {
        (**self).report(report);
    }
}

/// Sink that keeps every outcome and report in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    outcomes: Vec<Outcome>,
    reports: Vec<Report>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcomes recorded so far.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Reports recorded so far.
    #[must_use]
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Kinds of the recorded outcomes, in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<OutcomeKind> {
        self.outcomes.iter().map(|outcome| outcome.kind).collect()
    }

    /// Drops everything recorded so far.
    pub fn clear(&mut self) {
        self.outcomes.clear();
        self.reports.clear();
    }
}

impl OutcomeSink for Transcript {
    fn outcome(&mut self, outcome: &Outcome) {
        self.outcomes.push(outcome.clone());
    }

    fn report(&mut self, report: &Report) {
        self.reports.push(*report);
    }
}

/// Applies command scripts to a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Interpreter {
    mode: Mode,
}

impl Interpreter {
    /// Creates an interpreter using the provided placement mode.
    #[must_use]
    pub const fn new(mode: Mode) -> Self {
        Self { mode }
    }

    /// Placement mode applied to `PLACE` and `REPORT`.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches the placement mode for subsequent scripts.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Executes every line of `script` against `table` in order.
    ///
    /// The active robot starts as the table's active robot and is carried
    /// from line to line; only `ROBOT` and a `PLACE` issued while no robot is
    /// active change it.
    pub fn execute<S>(&self, table: &mut Table, script: &str, sink: &mut S)
    where
        S: OutcomeSink + ?Sized,
    {
        let mut active = table.active_id();
        for line in script.lines() {
            if let Some(outcome) = self.apply_line(table, &mut active, line, sink) {
                sink.outcome(&outcome);
            }
        }
    }

    fn apply_line<S>(
        &self,
        table: &mut Table,
        active: &mut Option<RobotId>,
        line: &str,
        sink: &mut S,
    ) -> Option<Outcome>
    where
        S: OutcomeSink + ?Sized,
    {
        let normalized = parse::normalize(line);
        log::trace!("applying '{normalized}'");

        let parsed = match parse::parse_line(&normalized) {
            Ok(None) => return None,
            Ok(Some(instruction)) => Ok(instruction),
            Err(error) => {
                log::debug!("rejected line '{normalized}': {error}");
                Err(error)
            }
        };

        let command = match &parsed {
            Ok(Instruction::Select(_)) => ROBOT_KEYWORD.to_owned(),
            Ok(Instruction::Place { .. }) => PLACE_KEYWORD.to_owned(),
            _ => normalized,
        };

        let kind = match parsed {
            Ok(Instruction::Select(id)) => match table.choose_robot(id) {
                Some(_) => {
                    *active = Some(id);
                    OutcomeKind::Activated { robot: id }
                }
                None => OutcomeKind::NotOnTable { robot: id },
            },
            Ok(Instruction::Place { cell, facing }) => {
                self.place(table, active, cell, facing)
            }
            Err(error) if error.has_keyword() => OutcomeKind::InvalidCommand,
            parsed => match active_robot(table, *active) {
                None => OutcomeKind::NoActiveRobot,
                Some(robot) => match parsed {
                    Ok(Instruction::Turn(turn)) => match table.turn_robot(robot.id, turn) {
                        Some(facing) => OutcomeKind::Turned {
                            robot: robot.id,
                            facing,
                        },
                        None => OutcomeKind::NoActiveRobot,
                    },
                    Ok(Instruction::Move) => match table.move_robot(robot.id) {
                        Some(Ok(step)) => OutcomeKind::Moved {
                            robot: robot.id,
                            from: step.from,
                            to: step.to,
                        },
                        Some(Err(blocked)) => OutcomeKind::from_blocked(blocked),
                        None => OutcomeKind::NoActiveRobot,
                    },
                    Ok(Instruction::Report) => {
                        let report = match self.mode {
                            Mode::Single => Report::Robot(robot),
                            Mode::Multiple => Report::Table(table.snapshot()),
                        };
                        sink.report(&report);
                        OutcomeKind::Reported
                    }
                    _ => OutcomeKind::InvalidCommand,
                },
            },
        };

        Some(Outcome {
            command,
            active: active_robot(table, *active),
            kind,
        })
    }

    fn place(
        &self,
        table: &mut Table,
        active: &mut Option<RobotId>,
        cell: CellCoord,
        facing: Facing,
    ) -> OutcomeKind {
        let result = match (*active, self.mode) {
            (None, _) => table.add_robot(cell, facing).map(|robot| {
                *active = Some(robot.id);
                OutcomeKind::PlacedAndActivated { robot }
            }),
            (Some(_), Mode::Multiple) => table
                .add_robot(cell, facing)
                .map(|robot| OutcomeKind::Placed { robot }),
            (Some(id), Mode::Single) => match table.relocate_robot(id, cell, facing) {
                Some(result) => result.map(|robot| OutcomeKind::Relocated { robot }),
                None => return OutcomeKind::NoActiveRobot,
            },
        };
        result.unwrap_or_else(OutcomeKind::from_blocked)
    }
}

fn active_robot(table: &Table, active: Option<RobotId>) -> Option<RobotSnapshot> {
    active
        .and_then(|id| table.robot(id))
        .and_then(Robot::snapshot)
}
