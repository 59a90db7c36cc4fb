use std::fs;

use anyhow::{Context, Result};
use serde::de::IgnoredAny;

use super::outcome_from;
use crate::core::{Check, CheckInput, CheckOutcome, FileFilter, Status};

/// Rejects JSON files that don't parse.
pub struct JsonSyntax {
    filter: FileFilter,
}

impl JsonSyntax {
    pub fn new() -> Self {
        Self {
            filter: FileFilter::extensions(&["json"]),
        }
    }
}

impl Default for JsonSyntax {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for JsonSyntax {
    fn name(&self) -> &str {
        "json_syntax"
    }

    fn description(&self) -> &str {
        "Check JSON syntax"
    }

    fn file_filter(&self) -> Option<&FileFilter> {
        Some(&self.filter)
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckOutcome> {
        let mut findings = Vec::new();
        for file in input.files {
            input.interrupt.check()?;
            let content = fs::read_to_string(input.absolute(file))
                .with_context(|| format!("Failed to read {}", file.display()))?;
            if let Err(err) = serde_json::from_str::<IgnoredAny>(&content) {
                findings.push(format!("{}: {}", file.display(), err));
            }
        }
        Ok(outcome_from(findings, Status::Bad))
    }
}
