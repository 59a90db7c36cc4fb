use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::{Check, CheckInput, CheckOutcome};

/// Asks for confirmation when a change touches a restricted directory or
/// file, e.g. vendored code.
pub struct RestrictedPaths {
    paths: Vec<PathBuf>,
}

impl RestrictedPaths {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            paths: paths
                .into_iter()
                .map(|p| p.as_ref().components().collect())
                .collect(),
        }
    }
}

impl Check for RestrictedPaths {
    fn name(&self) -> &str {
        "restricted_paths"
    }

    fn description(&self) -> &str {
        "Check for changes to restricted paths"
    }

    fn run(&self, input: &CheckInput<'_>) -> Result<CheckOutcome> {
        let touched: Vec<String> = self
            .paths
            .iter()
            .filter(|restricted| input.files.iter().any(|f| f.starts_with(restricted)))
            .map(|restricted| format!("changes staged under {}", restricted.display()))
            .collect();

        if touched.is_empty() {
            Ok(CheckOutcome::good())
        } else {
            Ok(CheckOutcome::stop(touched.join("\n")))
        }
    }
}
