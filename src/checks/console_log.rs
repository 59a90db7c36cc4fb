use anyhow::Result;

use super::{outcome_from, scan_lines};
use crate::core::{Check, CheckInput, CheckOutcome, FileFilter, Status};

/// Marker that allows a `console.log` on the same line.
pub const ALLOW_MARKER: &str = "ALLOW_CONSOLE_LOG";

/// Flags `console.log` calls left in JavaScript and TypeScript sources.
pub struct ConsoleLog {
    filter: FileFilter,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self {
            filter: FileFilter::extensions(&["js", "jsx", "mjs", "cjs", "ts", "tsx"]),
        }
    }
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::new()
    }
}

fn is_offending(line: &str) -> bool {
    line.contains("console.log")
        && !line.trim_start().starts_with("//")
        && !line.contains(ALLOW_MARKER)
}

impl Check for ConsoleLog {
    fn name(&self) -> &str {
        "console_log"
    }

    fn description(&self) -> &str {
        "Check for console.log calls"
    }

    fn file_filter(&self) -> Option<&FileFilter> {
        Some(&self.filter)
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckOutcome> {
        let findings = scan_lines(input, is_offending)?;
        Ok(outcome_from(findings, Status::Bad))
    }
}
