use std::{
    env, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::debug;

use super::super::{
    args::{OutputFormat, RunCommand},
    exit_status::ExitStatus,
    json_report::JsonReporter,
    report::TerminalReporter,
};
use super::{LoadedChecks, load_checks};
use crate::{
    config::{ConfigLoadResult, load_config},
    contexts::{FileListContext, HookType, PreCommitContext, PrePushContext},
    core::{
        CheckDefinition, HookContext, HookRunner, Interrupt, LoadWarning, Reporter, RunResult,
        SkipDirective,
    },
    git,
};

pub fn run(cmd: RunCommand) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to determine current directory")?;
    let hook = cmd.common.hook;

    let ConfigLoadResult { config, from_file } = load_config(&cwd)?;
    debug!(from_file, "configuration loaded");

    let mut ctx = build_context(&cmd, hook, &cwd)?;
    let LoadedChecks {
        definitions,
        warnings,
    } = load_checks(ctx.root(), &config, hook)?;

    let interrupt = Interrupt::new();
    if let Err(err) = interrupt.install_ctrl_c() {
        debug!(error = %format!("{:#}", err), "Ctrl-C handling unavailable");
    }

    let run = HookRun {
        definitions: &definitions,
        warnings: &warnings,
        skip: SkipDirective::from_values(&cmd.skip),
        interrupt,
    };
    let result = match cmd.format {
        OutputFormat::Text => run.execute(
            &mut TerminalReporter::new(io::stdout().lock()),
            ctx.as_mut(),
        ),
        OutputFormat::Json => run.execute(&mut JsonReporter::new(io::stdout().lock()), ctx.as_mut()),
    };

    Ok(ExitStatus::from_verdict(
        result.verdict(),
        cmd.allow_attention,
    ))
}

struct HookRun<'a> {
    definitions: &'a [CheckDefinition],
    warnings: &'a [LoadWarning],
    skip: SkipDirective,
    interrupt: Interrupt,
}

impl HookRun<'_> {
    fn execute(self, reporter: &mut dyn Reporter, ctx: &mut dyn HookContext) -> RunResult {
        for warning in self.warnings {
            reporter.load_warning(warning);
        }
        HookRunner::new(reporter)
            .with_skip(self.skip)
            .with_interrupt(self.interrupt)
            .run(self.definitions, ctx)
    }
}

/// Pick the context for this run: an explicit file list, every tracked file,
/// or the hook's own view of the repository.
fn build_context(cmd: &RunCommand, hook: HookType, cwd: &Path) -> Result<Box<dyn HookContext>> {
    let repo_root = git::find_repo_root(cwd);

    if !cmd.files.is_empty() {
        let root = repo_root.unwrap_or_else(|| cwd.to_path_buf());
        let files: Vec<PathBuf> = cmd.files.iter().map(|f| cwd.join(f)).collect();
        return Ok(Box::new(FileListContext::new(hook, root, files)));
    }

    let root = repo_root.context("Not inside a git repository (use --files to check specific files)")?;
    debug!(root = %root.display(), %hook, "building hook context");

    if cmd.all_files {
        return Ok(Box::new(FileListContext::all_files(hook, root)?));
    }
    let ctx: Box<dyn HookContext> = match hook {
        HookType::PreCommit => Box::new(PreCommitContext::new(root)?),
        HookType::PrePush => Box::new(PrePushContext::new(root)?),
    };
    Ok(ctx)
}
