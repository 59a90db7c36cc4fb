//! Machine-readable run reporting: one JSON document per run.

use std::io::Write;

use serde::Serialize;

use crate::core::{LoadWarning, Reporter, RunResult, Verdict};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRun<'a> {
    verdict: Verdict,
    #[serde(flatten)]
    run: &'a RunResult,
    warnings: &'a [String],
}

/// Buffers load warnings and writes the whole run once it finishes.
pub struct JsonReporter<W: Write> {
    writer: W,
    warnings: Vec<String>,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            warnings: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn load_warning(&mut self, warning: &LoadWarning) {
        self.warnings.push(warning.to_string());
    }

    fn run_finished(&mut self, result: &RunResult) {
        let report = JsonRun {
            verdict: result.verdict(),
            run: result,
            warnings: &self.warnings,
        };
        if let Ok(json) = serde_json::to_string_pretty(&report) {
            let _ = writeln!(self.writer, "{}", json);
        }
    }
}
