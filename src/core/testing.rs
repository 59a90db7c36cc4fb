//! Test doubles for the engine.

use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::{Result, anyhow};

use super::{
    check::{Check, CheckDefinition, CheckInput, CheckOutcome, FileFilter, Origin},
    context::HookContext,
    error::Interrupted,
    interrupt::Interrupt,
    registry::LoadWarning,
    reporter::Reporter,
    runner::{CheckResult, RunResult},
    status::Outcome,
};

pub struct FakeContext {
    root: PathBuf,
    files: Vec<PathBuf>,
    setup_error: Option<&'static str>,
    pub setup_calls: usize,
    pub cleanup_calls: usize,
}

impl FakeContext {
    pub fn new(files: &[&str]) -> Self {
        Self {
            root: PathBuf::from("."),
            files: files.iter().map(PathBuf::from).collect(),
            setup_error: None,
            setup_calls: 0,
            cleanup_calls: 0,
        }
    }

    pub fn failing_setup(mut self, error: &'static str) -> Self {
        self.setup_error = Some(error);
        self
    }
}

impl HookContext for FakeContext {
    fn hook_name(&self) -> &str {
        "pre-commit"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn changed_files(&self) -> &[PathBuf] {
        &self.files
    }

    fn setup_environment(&mut self) -> Result<()> {
        self.setup_calls += 1;
        match self.setup_error {
            Some(error) => Err(anyhow!(error)),
            None => Ok(()),
        }
    }

    fn cleanup_environment(&mut self) -> Result<()> {
        self.cleanup_calls += 1;
        Ok(())
    }
}

pub enum Behavior {
    Return(CheckOutcome),
    Fail(&'static str),
    Panic(&'static str),
    /// Trip the interrupt and bail out the way interrupt-aware helpers do.
    Interrupt(Interrupt),
    /// Trip the interrupt but carry on as if nothing happened.
    TriggerAndReturn(Interrupt, CheckOutcome),
}

pub struct ScriptedCheck {
    name: &'static str,
    description: String,
    filter: Option<FileFilter>,
    behavior: Behavior,
    seen: Rc<RefCell<Vec<PathBuf>>>,
}

impl ScriptedCheck {
    pub fn new(name: &'static str, behavior: Behavior) -> Self {
        Self {
            name,
            description: format!("Running {}", name),
            filter: None,
            behavior,
            seen: Rc::default(),
        }
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Files handed to the most recent `run`.
    pub fn seen_files(&self) -> Rc<RefCell<Vec<PathBuf>>> {
        Rc::clone(&self.seen)
    }
}

impl Check for ScriptedCheck {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn file_filter(&self) -> Option<&FileFilter> {
        self.filter.as_ref()
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckOutcome> {
        *self.seen.borrow_mut() = input.files.to_vec();
        match &self.behavior {
            Behavior::Return(outcome) => Ok(outcome.clone()),
            Behavior::Fail(message) => Err(anyhow!(*message)),
            Behavior::Panic(message) => panic!("{}", message),
            Behavior::Interrupt(interrupt) => {
                interrupt.trigger();
                Err(Interrupted.into())
            }
            Behavior::TriggerAndReturn(interrupt, outcome) => {
                interrupt.trigger();
                Ok(outcome.clone())
            }
        }
    }
}

pub fn definition(check: ScriptedCheck) -> CheckDefinition {
    CheckDefinition::new(Box::new(check), Origin::Builtin)
}

/// Reporter that records events as short strings.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn load_warning(&mut self, warning: &LoadWarning) {
        self.events.push(format!("load warning {}", warning.source));
    }

    fn setup_failed(&mut self, hook: &str, error: &str) {
        self.events.push(format!("setup failed {}: {}", hook, error));
    }

    fn no_applicable_checks(&mut self, hook: &str) {
        self.events.push(format!("no applicable checks {}", hook));
    }

    fn run_started(&mut self, hook: &str) {
        self.events.push(format!("run started {}", hook));
    }

    fn check_skipped(&mut self, name: &str) {
        self.events.push(format!("skipped {}", name));
    }

    fn skip_refused(&mut self, name: &str) {
        self.events.push(format!("skip refused {}", name));
    }

    fn check_started(&mut self, name: &str, _description: &str) {
        self.events.push(format!("started {}", name));
    }

    fn check_finished(&mut self, result: &CheckResult, quiet: bool) {
        let status = match result.outcome {
            Outcome::Finished(status) => status.to_string(),
            Outcome::Interrupted => "interrupted".to_string(),
        };
        let mut event = format!("finished {} {}", result.name, status);
        if let Some(message) = &result.message {
            event.push_str(&format!(": {}", message));
        }
        if quiet {
            event.push_str(" (quiet)");
        }
        self.events.push(event);
    }

    fn run_finished(&mut self, result: &RunResult) {
        self.events.push(format!("run finished {}", result.verdict()));
    }
}
