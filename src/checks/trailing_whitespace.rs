use anyhow::Result;

use super::{outcome_from, scan_lines};
use crate::core::{Check, CheckInput, CheckOutcome, Status};

/// Flags lines ending in spaces or tabs.
///
/// Reported as `stop` rather than `bad`: whitespace is sometimes intentional
/// (Markdown line breaks, fixtures), so it needs a human decision.
pub struct TrailingWhitespace;

impl TrailingWhitespace {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrailingWhitespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for TrailingWhitespace {
    fn name(&self) -> &str {
        "trailing_whitespace"
    }

    fn description(&self) -> &str {
        "Check for trailing whitespace"
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckOutcome> {
        let findings = scan_lines(input, |line| line.ends_with([' ', '\t']))?;
        Ok(outcome_from(findings, Status::Stop))
    }
}
