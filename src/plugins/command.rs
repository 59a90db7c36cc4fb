use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::Result;
use serde::Deserialize;

use crate::core::{
    Check, CheckInput, CheckOutcome, CheckSettings, FileFilter, Status, process,
};

/// Status reported when a plugin command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStatus {
    Warn,
    Stop,
    #[default]
    Bad,
}

impl From<FailureStatus> for Status {
    fn from(value: FailureStatus) -> Self {
        match value {
            FailureStatus::Warn => Status::Warn,
            FailureStatus::Stop => Status::Stop,
            FailureStatus::Bad => Status::Bad,
        }
    }
}

/// On-disk shape of a plugin file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PluginDefinition {
    /// Defaults to the file stem.
    #[serde(default)]
    pub name: Option<String>,
    pub description: String,
    pub command: Vec<String>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default = "default_pass_files")]
    pub pass_files: bool,
    #[serde(default)]
    pub on_failure: FailureStatus,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub quiet: Option<bool>,
}

fn default_pass_files() -> bool {
    true
}

/// A check that runs an external command from the repository root.
#[derive(Debug)]
pub struct CommandCheck {
    name: String,
    description: String,
    program: String,
    args: Vec<String>,
    filter: Option<FileFilter>,
    pass_files: bool,
    on_failure: Status,
    defaults: CheckSettings,
}

impl CommandCheck {
    /// Build a check from a parsed definition.
    ///
    /// Fails with a human-readable reason if the command is empty or an
    /// `include` pattern is not a valid glob.
    pub fn from_definition(name: String, def: PluginDefinition) -> Result<Self, String> {
        let mut command = def.command.into_iter();
        let program = match command.next() {
            Some(program) if !program.trim().is_empty() => program,
            _ => return Err("empty command".to_string()),
        };
        let filter = def
            .include
            .map(|patterns| FileFilter::globs(patterns.as_slice()))
            .transpose()
            .map_err(|e| format!("invalid include pattern: {}", e))?;

        let base = CheckSettings::default();
        Ok(Self {
            name,
            description: def.description,
            program,
            args: command.collect(),
            filter,
            pass_files: def.pass_files,
            on_failure: def.on_failure.into(),
            defaults: CheckSettings {
                enabled: def.enabled.unwrap_or(base.enabled),
                required: def.required.unwrap_or(base.required),
                quiet: def.quiet.unwrap_or(base.quiet),
            },
        })
    }

    fn command(&self, root: &Path, files: &[PathBuf]) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(root);
        if self.pass_files {
            command.args(files);
        }
        command
    }
}

impl Check for CommandCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn file_filter(&self) -> Option<&FileFilter> {
        self.filter.as_ref()
    }

    fn defaults(&self) -> CheckSettings {
        self.defaults
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckOutcome> {
        let command = self.command(input.root, input.files);
        let output = match process::run_command(command, input.interrupt) {
            Ok(output) => output,
            Err(err) if process::is_not_found(&err) => {
                return Ok(CheckOutcome::warn(format!("{} not found", self.program)));
            }
            Err(err) => return Err(err),
        };

        if output.success() {
            Ok(CheckOutcome::good())
        } else {
            Ok(CheckOutcome::new(self.on_failure, output.combined()))
        }
    }
}
