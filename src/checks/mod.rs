//! Built-in check catalog.
//!
//! Each built-in is a small, self-contained check over the changed files. The
//! catalog is a static list per hook type; repository plugins loaded later can
//! replace any entry by reusing its name.

mod console_log;
mod json_syntax;
mod merge_conflict;
mod restricted_paths;
mod trailing_whitespace;

pub use console_log::ConsoleLog;
pub use json_syntax::JsonSyntax;
pub use merge_conflict::MergeConflict;
pub use restricted_paths::RestrictedPaths;
pub use trailing_whitespace::TrailingWhitespace;

use std::{fs, path::Path};

use anyhow::Result;
use enum_dispatch::enum_dispatch;

use crate::{
    config::Config,
    contexts::HookType,
    core::{
        Check, CheckInput, CheckOutcome, CheckSettings, CheckSource, FileFilter, LoadError, Origin,
        Status,
    },
};

#[enum_dispatch(Check)]
pub enum BuiltinCheck {
    TrailingWhitespace,
    MergeConflict,
    ConsoleLog,
    JsonSyntax,
    RestrictedPaths,
}

/// Built-in checks for `hook`, in execution order.
pub fn catalog(hook: HookType, config: &Config) -> Vec<BuiltinCheck> {
    match hook {
        HookType::PreCommit => vec![
            RestrictedPaths::new(config.restricted_paths.clone()).into(),
            MergeConflict::new().into(),
            TrailingWhitespace::new().into(),
            ConsoleLog::new().into(),
            JsonSyntax::new().into(),
        ],
        HookType::PrePush => vec![
            RestrictedPaths::new(config.restricted_paths.clone()).into(),
            MergeConflict::new().into(),
            JsonSyntax::new().into(),
        ],
    }
}

/// The built-in catalog as the first, highest-trust check source.
pub struct BuiltinSource<'a> {
    hook: HookType,
    config: &'a Config,
}

impl<'a> BuiltinSource<'a> {
    pub fn new(hook: HookType, config: &'a Config) -> Self {
        Self { hook, config }
    }
}

impl CheckSource for BuiltinSource<'_> {
    fn label(&self) -> String {
        format!("builtin {} checks", self.hook)
    }

    fn origin(&self) -> Origin {
        Origin::Builtin
    }

    fn load(&self) -> Result<Vec<Box<dyn Check>>, LoadError> {
        Ok(catalog(self.hook, self.config)
            .into_iter()
            .map(|check| Box::new(check) as Box<dyn Check>)
            .collect())
    }
}

/// Read a changed file as UTF-8 text, or `None` for binary and unreadable
/// files (deleted, permission denied), which line-based checks ignore.
fn read_text(input: &CheckInput<'_>, file: &Path) -> Option<String> {
    let bytes = fs::read(input.absolute(file)).ok()?;
    if bytes.contains(&0) {
        return None;
    }
    String::from_utf8(bytes).ok()
}

/// Scan every readable text file line by line, collecting `path:line: text`
/// for each line `hit` accepts.
fn scan_lines<F>(input: &CheckInput<'_>, mut hit: F) -> Result<Vec<String>>
where
    F: FnMut(&str) -> bool,
{
    let mut findings = Vec::new();
    for file in input.files {
        input.interrupt.check()?;
        let Some(content) = read_text(input, file) else {
            continue;
        };
        for (index, line) in content.lines().enumerate() {
            if hit(line) {
                findings.push(format!("{}:{}: {}", file.display(), index + 1, line.trim()));
            }
        }
    }
    Ok(findings)
}

/// `good` when there are no findings, otherwise `status` listing them.
fn outcome_from(findings: Vec<String>, status: Status) -> CheckOutcome {
    if findings.is_empty() {
        CheckOutcome::good()
    } else {
        CheckOutcome::new(status, findings.join("\n"))
    }
}
