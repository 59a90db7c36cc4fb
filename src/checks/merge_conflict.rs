use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use super::{outcome_from, scan_lines};
use crate::core::{Check, CheckInput, CheckOutcome, Status};

// `<<<<<<< ours`, `=======`, `>>>>>>> theirs`
static CONFLICT_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:<{7}|>{7})(?:\s|$)|^={7}$").unwrap());

/// Flags leftover merge conflict markers.
pub struct MergeConflict;

impl MergeConflict {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MergeConflict {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for MergeConflict {
    fn name(&self) -> &str {
        "merge_conflict"
    }

    fn description(&self) -> &str {
        "Check for merge conflict markers"
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckOutcome> {
        let findings = scan_lines(input, |line| {
            CONFLICT_MARKER_REGEX.is_match(line.trim_end_matches('\r'))
        })?;
        Ok(outcome_from(findings, Status::Bad))
    }
}
