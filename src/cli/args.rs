//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `run`: Run the checks for a hook against its changed files
//! - `list`: Show the merged check list for a hook
//! - `init`: Create a `.hookguard.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::{config::SKIP_ENV, contexts::HookType};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Run(cmd)) => cmd.common.verbose,
            Some(Command::List(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by hook commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Hook whose checks to use
    #[arg(long, value_enum, default_value_t)]
    pub hook: HookType,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct RunCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Check these files instead of the hook's changed files
    #[arg(long, num_args = 1.., conflicts_with = "all_files")]
    pub files: Vec<PathBuf>,

    /// Check every tracked file
    #[arg(long)]
    pub all_files: bool,

    /// Checks to skip, separated by commas, colons or spaces ("all" skips
    /// every check that isn't required)
    #[arg(long, env = SKIP_ENV)]
    pub skip: Vec<String>,

    /// Exit successfully when checks only need attention
    #[arg(long)]
    pub allow_attention: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a hook's checks
    Run(RunCommand),
    /// List the checks a hook would run, after plugins and configuration
    List(ListCommand),
    /// Initialize a new .hookguard.json configuration file
    Init,
}
