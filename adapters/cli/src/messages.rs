//! Human-readable rendering of outcomes and reports.

use robot_table_core::{Outcome, OutcomeKind, Report, RobotSnapshot};

const MOVE_COMMAND: &str = "MOVE";

/// Formats the log line for an outcome.
///
/// `Reported` outcomes have no line of their own: the report text is shown
/// instead.
pub(crate) fn outcome_message(outcome: &Outcome) -> Option<String> {
    let motion = outcome.command == MOVE_COMMAND;
    let message = match outcome.kind {
        OutcomeKind::InvalidCommand => format!("ERROR: Invalid command - {}", outcome.command),
        OutcomeKind::NoActiveRobot => "ERROR: There is no active robot".to_owned(),
        OutcomeKind::NotOnTable { robot } => format!("ERROR: Robot {robot} is not on table"),
        OutcomeKind::PositionInvalid { cell } if motion => {
            format!("WARNING: Motion forbidden - ({cell}) is out of table")
        }
        OutcomeKind::PositionInvalid { cell } => {
            format!("WARNING: Position ({cell}) is out of table")
        }
        OutcomeKind::PositionOccupied { cell } if motion => {
            format!("WARNING: Motion forbidden - ({cell}) is occupied")
        }
        OutcomeKind::PositionOccupied { cell } => {
            format!("WARNING: Position ({cell}) is occupied")
        }
        OutcomeKind::PlacedAndActivated { robot } => format!(
            "DONE: Robot {} was placed at ({}) and activated",
            robot.id, robot.cell
        ),
        OutcomeKind::Placed { robot } => {
            format!("DONE: Robot {} was placed at ({})", robot.id, robot.cell)
        }
        OutcomeKind::Relocated { robot } => {
            format!("DONE: Robot {} was relocated to ({})", robot.id, robot.cell)
        }
        OutcomeKind::Moved { robot, to, .. } => format!("DONE: Robot {robot} moved to ({to})"),
        OutcomeKind::Turned { robot, facing } => {
            format!("DONE: Robot {robot} turned to {facing}")
        }
        OutcomeKind::Activated { robot } => format!("DONE: Robot {robot} was activated"),
        OutcomeKind::Reported => return None,
    };
    Some(message)
}

/// Formats a report as shown to the user.
pub(crate) fn report_text(report: &Report) -> String {
    match report {
        Report::Robot(robot) => position(robot),
        Report::Table(table) => {
            let suffix = if table.robot_count > 1 { "s" } else { "" };
            let mut text = format!("{} robot{suffix} on table", table.robot_count);
            if let Some(robot) = &table.active {
                text.push_str(&format!(". Robot {} at ({}) is active", robot.id, position(robot)));
            }
            text
        }
    }
}

fn position(robot: &RobotSnapshot) -> String {
    format!("{},{}", robot.cell, robot.facing)
}
