use super::{
    registry::LoadWarning,
    runner::{CheckResult, RunResult},
};

/// Receiver of the runner's structured events.
///
/// Implementations own all human-facing formatting; the runner never prints.
/// Every method has an empty default so a reporter only handles the events it
/// cares about.
pub trait Reporter {
    fn load_warning(&mut self, _warning: &LoadWarning) {}

    /// `setup_environment` failed; no checks will run.
    fn setup_failed(&mut self, _hook: &str, _error: &str) {}

    /// Nothing applicable (and nothing skipped) for this change set.
    fn no_applicable_checks(&mut self, _hook: &str) {}

    fn run_started(&mut self, _hook: &str) {}

    fn check_skipped(&mut self, _name: &str) {}

    /// A skip was requested for a required check; it runs anyway.
    fn skip_refused(&mut self, _name: &str) {}

    /// Emitted before a check runs, or retroactively for a quiet check that
    /// didn't pass.
    fn check_started(&mut self, _name: &str, _description: &str) {}

    fn check_finished(&mut self, _result: &CheckResult, _quiet: bool) {}

    fn run_finished(&mut self, _result: &RunResult) {}
}
