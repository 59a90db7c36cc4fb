//! The hook runner: decides which checks run, executes them one at a time and
//! aggregates their statuses into a verdict.
//!
//! Per check, in precedence order:
//!
//! 1. disabled: dropped silently
//! 2. not applicable to the changed files: dropped silently
//! 3. skip requested, not required: dropped with a notice
//! 4. skip requested, required: notice, then runs anyway
//! 5. runs; errors and panics become `bad`
//! 6. interrupted: this and all remaining checks stop, verdict is blocking
//!
//! Checks always execute sequentially in definition order.

use std::{
    cell::Cell,
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
    sync::Once,
    thread,
    time::Instant,
};

use serde::Serialize;
use tracing::debug;

use super::{
    check::{CheckDefinition, CheckInput},
    context::{EnvironmentGuard, HookContext},
    error::Interrupted,
    interrupt::Interrupt,
    reporter::Reporter,
    skip::SkipDirective,
    status::{Outcome, Status, Verdict},
};

/// Recorded outcome of one executed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Required checks cannot be skipped.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

/// Everything that happened during one run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub hook: String,
    pub results: Vec<CheckResult>,
    /// Checks dropped because the user asked to skip them.
    pub skipped: Vec<String>,
    pub interrupted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_error: Option<String>,
}

impl RunResult {
    fn new(hook: &str) -> Self {
        Self {
            hook: hook.to_string(),
            ..Default::default()
        }
    }

    /// Aggregate verdict. Interruption and setup failure always block.
    pub fn verdict(&self) -> Verdict {
        if self.interrupted || self.setup_error.is_some() {
            return Verdict::Fail;
        }
        Verdict::aggregate(self.results.iter().filter_map(|r| r.outcome.status()))
    }

    pub fn count(&self, status: Status) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.status() == Some(status))
            .count()
    }
}

enum Step<'a> {
    Skip(&'a CheckDefinition),
    Run {
        def: &'a CheckDefinition,
        files: Vec<PathBuf>,
        skip_refused: bool,
    },
}

pub struct HookRunner<'r> {
    reporter: &'r mut dyn Reporter,
    skip: SkipDirective,
    interrupt: Interrupt,
}

impl<'r> HookRunner<'r> {
    pub fn new(reporter: &'r mut dyn Reporter) -> Self {
        Self {
            reporter,
            skip: SkipDirective::none(),
            interrupt: Interrupt::new(),
        }
    }

    pub fn with_skip(mut self, skip: SkipDirective) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Run `checks` against `ctx`.
    ///
    /// The context's environment is set up first and always cleaned up before
    /// this returns, whatever happens in between.
    pub fn run(&mut self, checks: &[CheckDefinition], ctx: &mut dyn HookContext) -> RunResult {
        let mut env = EnvironmentGuard::new(ctx);
        let mut result = RunResult::new(env.hook_name());

        if let Err(err) = env.setup() {
            let message = format!("{:#}", err);
            debug!(hook = %result.hook, error = %message, "environment setup failed");
            self.reporter.setup_failed(&result.hook, &message);
            result.setup_error = Some(message);
            self.reporter.run_finished(&result);
            return result;
        }

        let steps = self.plan(checks, env.changed_files());
        if steps.is_empty() {
            self.reporter.no_applicable_checks(&result.hook);
            self.reporter.run_finished(&result);
            return result;
        }

        self.reporter.run_started(&result.hook);

        for step in steps {
            match step {
                Step::Skip(def) => {
                    self.reporter.check_skipped(def.name());
                    result.skipped.push(def.name().to_string());
                }
                Step::Run {
                    def,
                    files,
                    skip_refused,
                } => {
                    if self.interrupt.is_triggered() {
                        result.interrupted = true;
                        break;
                    }
                    if skip_refused {
                        self.reporter.skip_refused(def.name());
                    }
                    let check_result = self.execute(def, env.root(), &files);
                    let interrupted = check_result.outcome == Outcome::Interrupted;
                    result.results.push(check_result);
                    if interrupted {
                        result.interrupted = true;
                        break;
                    }
                }
            }
        }

        debug!(hook = %result.hook, verdict = %result.verdict(), "run finished");
        self.reporter.run_finished(&result);
        result
    }

    fn plan<'a>(&self, checks: &'a [CheckDefinition], changed: &[PathBuf]) -> Vec<Step<'a>> {
        checks
            .iter()
            .filter(|def| def.settings.enabled)
            .filter_map(|def| {
                let files = def.applicable_files(changed)?;
                let skip_requested = self.skip.requests(def.name());
                if skip_requested && !def.settings.required {
                    Some(Step::Skip(def))
                } else {
                    Some(Step::Run {
                        def,
                        files,
                        skip_refused: skip_requested,
                    })
                }
            })
            .collect()
    }

    fn execute(&mut self, def: &CheckDefinition, root: &Path, files: &[PathBuf]) -> CheckResult {
        let quiet = def.settings.quiet;
        if !quiet {
            self.reporter.check_started(def.name(), def.description());
        }

        let input = CheckInput {
            root,
            files,
            interrupt: &self.interrupt,
        };
        let started = Instant::now();
        let caught = catch_quietly(|| def.check.run(&input));

        let interrupted = self.interrupt.is_triggered()
            || matches!(&caught, Ok(Err(err)) if err.is::<Interrupted>());

        let (outcome, message) = if interrupted {
            (Outcome::Interrupted, None)
        } else {
            match caught {
                Ok(Ok(outcome)) => (Outcome::Finished(outcome.status), outcome.message),
                Ok(Err(err)) => (
                    Outcome::Finished(Status::Bad),
                    Some(format!("Check raised unexpected error\n{:#}", err)),
                ),
                Err(payload) => (
                    Outcome::Finished(Status::Bad),
                    Some(format!("Check panicked\n{}", panic_message(payload.as_ref()))),
                ),
            }
        };

        debug!(
            check = def.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            ?outcome,
            "check finished"
        );

        if quiet && !outcome.is_good() {
            self.reporter.check_started(def.name(), def.description());
        }

        let result = CheckResult {
            name: def.name().to_string(),
            description: def.description().to_string(),
            outcome,
            message,
            required: def.settings.required,
        };
        self.reporter.check_finished(&result, quiet);
        result
    }
}

thread_local! {
    static SILENCE_PANICS: Cell<bool> = const { Cell::new(false) };
}

static QUIET_PANIC_HOOK: Once = Once::new();

/// `catch_unwind` without the default hook's stderr output for panics on
/// this thread. The panic is reported through the check's result instead.
/// Panics elsewhere still reach the previously installed hook.
fn catch_quietly<R>(f: impl FnOnce() -> R) -> thread::Result<R> {
    QUIET_PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !SILENCE_PANICS.with(Cell::get) {
                previous(info);
            }
        }));
    });

    SILENCE_PANICS.with(|silence| silence.set(true));
    let caught = panic::catch_unwind(AssertUnwindSafe(f));
    SILENCE_PANICS.with(|silence| silence.set(false));
    caught
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
