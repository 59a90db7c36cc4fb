//! Human-readable run reporting.
//!
//! Separate from the runner so hookguard can be used as a library; the
//! runner only emits events through [`Reporter`].

use std::io::Write;

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::{
    config::SKIP_ENV,
    core::{CheckResult, LoadWarning, Outcome, Reporter, RunResult, Status, Verdict},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Column where the result label of a check header starts.
const HEADER_WIDTH: usize = 70;

/// Writes check headers, results and a summary as the run progresses.
pub struct TerminalReporter<W: Write> {
    writer: W,
    warnings: usize,
}

impl<W: Write> TerminalReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            warnings: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn label(outcome: &Outcome) -> ColoredString {
    match outcome {
        Outcome::Finished(Status::Good) => "OK".green(),
        Outcome::Finished(Status::Warn) => "WARNING".yellow(),
        Outcome::Finished(Status::Stop) => "NEEDS ATTENTION".yellow().bold(),
        Outcome::Finished(Status::Bad) => "FAILED".red().bold(),
        Outcome::Interrupted => "INTERRUPTED".red(),
    }
}

/// `description` followed by dots up to [`HEADER_WIDTH`] display columns.
fn header(description: &str) -> String {
    let dots = HEADER_WIDTH.saturating_sub(description.width()).max(3);
    format!("{}{}", description, ".".repeat(dots))
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

impl<W: Write> Reporter for TerminalReporter<W> {
    fn load_warning(&mut self, warning: &LoadWarning) {
        let _ = writeln!(self.writer, "{} {}", "warning:".bold().yellow(), warning);
    }

    fn setup_failed(&mut self, hook: &str, error: &str) {
        let _ = writeln!(
            self.writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!("Failed to prepare the {} environment", hook).red()
        );
        let _ = writeln!(self.writer, "{}", error);
    }

    fn no_applicable_checks(&mut self, hook: &str) {
        let _ = writeln!(
            self.writer,
            "{}",
            format!("No {} checks apply to the changed files", hook).dimmed()
        );
    }

    fn run_started(&mut self, hook: &str) {
        let _ = writeln!(self.writer, "{}", format!("Running {} checks", hook).bold());
    }

    fn check_skipped(&mut self, name: &str) {
        let _ = writeln!(self.writer, "{}", format!("Skipping {}", name).dimmed());
    }

    fn skip_refused(&mut self, name: &str) {
        let _ = writeln!(
            self.writer,
            "{} cannot skip {} since it is required",
            "warning:".bold().yellow(),
            name.bold()
        );
    }

    fn check_started(&mut self, _name: &str, description: &str) {
        let _ = write!(self.writer, "{}", header(description));
        let _ = self.writer.flush();
    }

    fn check_finished(&mut self, result: &CheckResult, quiet: bool) {
        // Quiet checks that passed never printed a header.
        if quiet && result.outcome.is_good() {
            return;
        }
        if result.outcome == Outcome::Finished(Status::Warn) {
            self.warnings += 1;
        }
        let _ = writeln!(self.writer, "{}", label(&result.outcome));
        if let Some(message) = &result.message {
            for line in message.lines() {
                let _ = writeln!(self.writer, "  {}", line);
            }
        }
    }

    fn run_finished(&mut self, result: &RunResult) {
        if result.setup_error.is_some() {
            return;
        }
        if result.interrupted {
            let _ = writeln!(
                self.writer,
                "\n{} {}",
                FAILURE_MARK.red(),
                "Hook run interrupted by user".red()
            );
            return;
        }
        if result.results.is_empty() {
            return;
        }

        let hook = &result.hook;
        match result.verdict() {
            Verdict::Pass => {
                let mut msg = format!("All {} checks passed", hook);
                if self.warnings > 0 {
                    msg.push_str(&format!(" ({})", plural(self.warnings, "warning")));
                }
                let _ = writeln!(self.writer, "\n{} {}", SUCCESS_MARK.green(), msg.green());
            }
            Verdict::NeedsAttention => {
                let names: Vec<&str> = result
                    .results
                    .iter()
                    .filter(|r| r.outcome == Outcome::Finished(Status::Stop) && !r.required)
                    .map(|r| r.name.as_str())
                    .collect();
                let _ = writeln!(
                    self.writer,
                    "\n{} {}",
                    "!".yellow().bold(),
                    format!("{} checks need your attention", hook).yellow()
                );
                if names.is_empty() {
                    let _ = writeln!(
                        self.writer,
                        "  Review the output above. Required checks cannot be skipped."
                    );
                } else {
                    let _ = writeln!(
                        self.writer,
                        "  Review the output above. To proceed anyway, set {}={}",
                        SKIP_ENV,
                        names.join(",")
                    );
                }
            }
            Verdict::Fail => {
                let _ = writeln!(
                    self.writer,
                    "\n{} {}",
                    FAILURE_MARK.red(),
                    format!("One or more {} checks failed", hook).red()
                );
            }
        }
    }
}
