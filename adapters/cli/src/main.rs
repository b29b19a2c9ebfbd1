#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives robots around a table.

mod config;
mod messages;

use std::{
    fs,
    io::{self, BufRead, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use robot_table_core::{Mode, Outcome, Report};
use robot_table_system_interpreter::{Interpreter, OutcomeSink};
use robot_table_system_script_generator::{GeneratorTuning, ScriptGenerator};
use robot_table_world::Table;
use serde::Serialize;

use crate::config::{FileConfig, Overrides, Settings};

const CLEAR_COMMAND: &str = ":clear";
const STDIN_PATH: &str = "-";

#[derive(Debug, Parser)]
#[command(
    name = "robot-table",
    version,
    about = "Drive toy robots around a rectangular table"
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
    /// Number of columns on the table.
    #[arg(long, global = true)]
    width: Option<u32>,
    /// Number of rows on the table.
    #[arg(long, global = true)]
    height: Option<u32>,
    /// Let PLACE add robots instead of relocating the active one.
    #[arg(long, global = true, overrides_with = "single")]
    multiple: bool,
    /// Let PLACE relocate the active robot, overriding the config file.
    #[arg(long, global = true, overrides_with = "multiple")]
    single: bool,
    /// Suppress outcome lines and print reports only, in either format.
    #[arg(long, global = true, overrides_with = "verbose")]
    quiet: bool,
    /// Print outcome lines even when the config file disables them.
    #[arg(long, global = true, overrides_with = "quiet")]
    verbose: bool,
    /// Output format for outcomes and reports.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,
    /// TOML settings file layered beneath the flags.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Execute a script file, or standard input when omitted or `-`.
    Run { script: Option<PathBuf> },
    /// Execute standard input one line at a time against the same table.
    Step,
    /// Print a randomly generated script.
    Random {
        /// Seed for the generator; drawn from entropy when omitted.
        #[arg(long)]
        seed: Option<u64>,
        /// Number of turn and move rounds to generate.
        #[arg(long)]
        steps: Option<usize>,
        /// Execute the generated script after printing it.
        #[arg(long)]
        run: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Entry point for the robot table command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    let file = args.config.as_deref().map(FileConfig::load).transpose()?;
    let settings = Settings::resolve(
        file.as_ref(),
        Overrides {
            width: args.width,
            height: args.height,
            mode: flag_pair(args.multiple, args.single).map(|multiple| {
                if multiple {
                    Mode::Multiple
                } else {
                    Mode::Single
                }
            }),
            logging: flag_pair(args.verbose, args.quiet),
        },
    )?;
    log::debug!("resolved settings: {settings:?}");

    let stdout = io::stdout();
    let mut sink = ConsoleSink::new(stdout.lock(), args.format, settings.logging);

    match args.command {
        Command::Run { script } => {
            let script = read_script(script.as_deref())?;
            run_script(&settings, &script, &mut sink)
        }
        Command::Step => run_steps(&settings, io::stdin().lock(), &mut sink),
        Command::Random { seed, steps, run } => {
            let seed = seed.unwrap_or_else(rand::random);
            log::info!("generating script with seed {seed}");
            let mut tuning = GeneratorTuning::default();
            if let Some(steps) = steps {
                tuning.steps = steps;
            }
            let script = ScriptGenerator::with_tuning(seed, tuning).generate(settings.size);
            sink.script(&script);
            if run {
                run_script(&settings, &script, &mut sink)
            } else {
                sink.finish()
            }
        }
    }
}

/// Collapses an on/off flag pair into an override; clap keeps only the last
/// of the two on the command line.
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new(STDIN_PATH) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display())),
        _ => {
            let mut script = String::new();
            let _ = io::stdin()
                .read_to_string(&mut script)
                .context("failed to read script from standard input")?;
            Ok(script)
        }
    }
}

fn run_script<W: Write>(settings: &Settings, script: &str, sink: &mut ConsoleSink<W>) -> Result<()> {
    let mut table = Table::new(settings.size);
    Interpreter::new(settings.mode).execute(&mut table, script, sink);
    sink.finish()
}

fn run_steps<R: BufRead, W: Write>(
    settings: &Settings,
    input: R,
    sink: &mut ConsoleSink<W>,
) -> Result<()> {
    let interpreter = Interpreter::new(settings.mode);
    let mut table = Table::new(settings.size);

    for line in input.lines() {
        let line = line.context("failed to read command from standard input")?;
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if command.eq_ignore_ascii_case(CLEAR_COMMAND) {
            table.clear();
            sink.cleared();
        } else {
            interpreter.execute(&mut table, command, sink);
        }
        sink.finish()?;
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
enum JsonLine<'a> {
    Outcome(&'a Outcome),
    Report(&'a Report),
    Script(&'a str),
    Cleared,
}

/// Writes outcomes and reports to a terminal-like stream.
///
/// The first write failure is kept and surfaced by [`ConsoleSink::finish`];
/// later output is dropped.
struct ConsoleSink<W: Write> {
    out: W,
    format: OutputFormat,
    logging: bool,
    error: Option<anyhow::Error>,
}

impl<W: Write> ConsoleSink<W> {
    fn new(out: W, format: OutputFormat, logging: bool) -> Self {
        Self {
            out,
            format,
            logging,
            error: None,
        }
    }

    fn line(&mut self, line: Result<String, serde_json::Error>) {
        if self.error.is_some() {
            return;
        }
        let written = line
            .context("failed to serialise output")
            .and_then(|line| writeln!(self.out, "{line}").context("failed to write output"));
        if let Err(error) = written {
            self.error = Some(error);
        }
    }

    fn script(&mut self, script: &str) {
        match self.format {
            OutputFormat::Text => self.line(Ok(script.to_owned())),
            OutputFormat::Json => self.line(serde_json::to_string(&JsonLine::Script(script))),
        }
    }

    fn cleared(&mut self) {
        match self.format {
            OutputFormat::Text if self.logging => self.line(Ok("DONE: Table was cleared".to_owned())),
            OutputFormat::Text => {}
            OutputFormat::Json if self.logging => {
                self.line(serde_json::to_string(&JsonLine::Cleared));
            }
            OutputFormat::Json => {}
        }
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.out.flush().context("failed to flush output")
    }
}

impl<W: Write> OutcomeSink for ConsoleSink<W> {
    fn outcome(&mut self, outcome: &Outcome) {
        if !self.logging {
            return;
        }
        match self.format {
            OutputFormat::Text => {
                if let Some(message) = messages::outcome_message(outcome) {
                    self.line(Ok(message));
                }
            }
            OutputFormat::Json => self.line(serde_json::to_string(&JsonLine::Outcome(outcome))),
        }
    }

    fn report(&mut self, report: &Report) {
        match self.format {
            OutputFormat::Text if self.logging => {
                self.line(Ok(format!("REPORT: {}", messages::report_text(report))));
            }
            OutputFormat::Text => self.line(Ok(messages::report_text(report))),
            OutputFormat::Json => self.line(serde_json::to_string(&JsonLine::Report(report))),
        }
    }
}
