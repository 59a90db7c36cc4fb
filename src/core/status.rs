//! Check statuses and the run verdict.
//!
//! A check reports one of four [`Status`] values. The runner records either a
//! finished status or an interruption marker per check ([`Outcome`]), and the
//! whole run collapses into a single [`Verdict`].

use serde::Serialize;

/// Status returned by a single check.
///
/// Variants are ordered by severity, so the most severe status of a run is
/// simply the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The check passed.
    Good,
    /// Advisory issue; surfaced but never blocks.
    Warn,
    /// Needs an explicit human override before proceeding.
    Stop,
    /// The check failed.
    Bad,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Good => write!(f, "good"),
            Status::Warn => write!(f, "warn"),
            Status::Stop => write!(f, "stop"),
            Status::Bad => write!(f, "bad"),
        }
    }
}

/// What the runner recorded for one executed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "status")]
pub enum Outcome {
    Finished(Status),
    /// The user cancelled the run while this check was executing.
    Interrupted,
}

impl Outcome {
    pub fn status(&self) -> Option<Status> {
        match self {
            Outcome::Finished(status) => Some(*status),
            Outcome::Interrupted => None,
        }
    }

    pub fn is_good(&self) -> bool {
        matches!(self, Outcome::Finished(Status::Good))
    }
}

/// Overall decision for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Pass,
    NeedsAttention,
    Fail,
}

impl Verdict {
    /// Collapse a set of check statuses into a verdict.
    ///
    /// `bad` dominates `stop`, which dominates everything else. `warn` never
    /// blocks.
    pub fn aggregate<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Status>,
    {
        match statuses.into_iter().max() {
            Some(Status::Bad) => Verdict::Fail,
            Some(Status::Stop) => Verdict::NeedsAttention,
            Some(Status::Warn) | Some(Status::Good) | None => Verdict::Pass,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::NeedsAttention => write!(f, "needs-attention"),
            Verdict::Fail => write!(f, "fail"),
        }
    }
}
