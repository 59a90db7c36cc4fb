use std::process::ExitCode;

use crate::core::Verdict;

/// Exit status for CLI commands.
///
/// - `Success` (0): Checks passed (or the command completed)
/// - `Failure` (1): Checks failed, or need attention that wasn't allowed
/// - `Error` (2): Command failed due to internal error (config error, not a git repository, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed successfully, nothing blocks.
    Success,
    /// Command completed but something blocks the hook.
    Failure,
    /// Command failed due to internal error.
    Error,
}

impl ExitStatus {
    /// Map a run verdict to an exit status. `needs-attention` only passes
    /// when the user explicitly allows it.
    pub fn from_verdict(verdict: Verdict, allow_attention: bool) -> Self {
        match verdict {
            Verdict::Pass => ExitStatus::Success,
            Verdict::NeedsAttention if allow_attention => ExitStatus::Success,
            Verdict::NeedsAttention | Verdict::Fail => ExitStatus::Failure,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
