use std::{
    env,
    io::{self, Write},
};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{args::ListCommand, exit_status::ExitStatus};
use super::{LoadedChecks, load_checks};
use crate::{config::load_config, contexts::HookType, core::CheckDefinition, git};

pub fn list(cmd: ListCommand) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to determine current directory")?;
    let hook = cmd.common.hook;
    let root = git::find_repo_root(&cwd).unwrap_or_else(|| cwd.clone());
    let config = load_config(&cwd)?.config;

    let LoadedChecks {
        definitions,
        warnings,
    } = load_checks(&root, &config, hook)?;

    for warning in &warnings {
        eprintln!("{} {}", "warning:".bold().yellow(), warning);
    }
    print_list_to(hook, &definitions, &mut io::stdout().lock());

    Ok(ExitStatus::Success)
}

fn flags(def: &CheckDefinition) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if !def.settings.enabled {
        flags.push("disabled");
    }
    if def.settings.required {
        flags.push("required");
    }
    if def.settings.quiet {
        flags.push("quiet");
    }
    flags
}

/// Print definitions in execution order with origin and effective flags.
pub fn print_list_to<W: Write>(hook: HookType, definitions: &[CheckDefinition], writer: &mut W) {
    let _ = writeln!(writer, "{}", format!("{} checks:", hook).bold());
    let width = definitions.iter().map(|d| d.name().len()).max().unwrap_or(0);

    for def in definitions {
        let flags = flags(def);
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" ({})", flags.join(", "))
        };
        let _ = writeln!(
            writer,
            "  {:<width$}  {}{}",
            def.name(),
            def.origin.to_string().dimmed(),
            flags,
            width = width
        );
    }
}
