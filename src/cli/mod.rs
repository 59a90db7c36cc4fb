//! Command-line layer: argument parsing, commands and output formatting.

pub mod args;
mod commands;
pub mod exit_status;
pub mod json_report;
pub mod report;

use anyhow::Result;

pub use args::{Arguments, Command};
pub use commands::{LoadedChecks, load_checks};
pub use exit_status::ExitStatus;
pub use json_report::JsonReporter;
pub use report::TerminalReporter;

use crate::logging;
use commands::{init::init, list::list, run::run};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    logging::init(args.verbose());

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Run(cmd)) => run(cmd),
        Some(Command::List(cmd)) => list(cmd),
        Some(Command::Init) => init(),
        None => Ok(ExitStatus::Success),
    }
}
