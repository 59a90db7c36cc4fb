//! The check contract and the resolved per-run check definition.

use std::path::{Path, PathBuf};

use enum_dispatch::enum_dispatch;
use glob::Pattern;
use serde::Serialize;

use super::{interrupt::Interrupt, status::Status};
use crate::config::CheckConfig;

/// A unit of verification.
///
/// The runner only ever talks to a check through this trait. Built-in checks
/// are dispatched statically through [`crate::checks::BuiltinCheck`]; plugin
/// checks and test doubles are boxed trait objects.
#[enum_dispatch]
pub trait Check {
    /// Unique identifier; later sources override earlier ones by this name.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Files this check cares about. `None` means the check always applies.
    fn file_filter(&self) -> Option<&FileFilter> {
        None
    }

    /// Settings used when the configuration doesn't say otherwise.
    fn defaults(&self) -> CheckSettings {
        CheckSettings::default()
    }

    fn run(&self, input: &CheckInput<'_>) -> anyhow::Result<CheckOutcome>;
}

/// Status plus optional message returned by [`Check::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub status: Status,
    pub message: Option<String>,
}

impl CheckOutcome {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            message: (!message.is_empty()).then_some(message),
        }
    }

    pub fn good() -> Self {
        Self {
            status: Status::Good,
            message: None,
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Status::Warn, message)
    }

    pub fn stop(message: impl Into<String>) -> Self {
        Self::new(Status::Stop, message)
    }

    pub fn bad(message: impl Into<String>) -> Self {
        Self::new(Status::Bad, message)
    }
}

/// What a check gets to look at while it runs.
pub struct CheckInput<'a> {
    /// Repository root; relative file paths are resolved against it.
    pub root: &'a Path,
    /// Changed files that pass the check's filter (all changed files when
    /// the check has none).
    pub files: &'a [PathBuf],
    pub interrupt: &'a Interrupt,
}

impl CheckInput<'_> {
    pub fn absolute(&self, file: &Path) -> PathBuf {
        self.root.join(file)
    }
}

/// Applicability filter over changed file paths.
#[derive(Debug, Clone, PartialEq)]
pub enum FileFilter {
    /// Match by file extension, without the leading dot.
    Extensions(Vec<String>),
    /// Match by glob pattern against the repository-relative path.
    Globs(Vec<Pattern>),
}

impl FileFilter {
    pub fn extensions(extensions: &[&str]) -> Self {
        FileFilter::Extensions(extensions.iter().map(|e| e.to_string()).collect())
    }

    pub fn globs<S: AsRef<str>>(patterns: &[S]) -> Result<Self, glob::PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FileFilter::Globs(patterns))
    }

    pub fn matches(&self, path: &Path) -> bool {
        match self {
            FileFilter::Extensions(extensions) => path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))),
            FileFilter::Globs(patterns) => patterns.iter().any(|p| p.matches_path(path)),
        }
    }

    pub fn select(&self, files: &[PathBuf]) -> Vec<PathBuf> {
        files.iter().filter(|f| self.matches(f)).cloned().collect()
    }
}

/// Enablement flags for a check, after configuration is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckSettings {
    pub enabled: bool,
    /// A required check refuses user skip requests.
    pub required: bool,
    /// A quiet check only shows its header when it doesn't pass.
    pub quiet: bool,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            required: false,
            quiet: false,
        }
    }
}

impl CheckSettings {
    /// Overlay the values a config entry sets explicitly.
    pub fn apply(self, config: &CheckConfig) -> Self {
        Self {
            enabled: config.enabled.unwrap_or(self.enabled),
            required: config.required.unwrap_or(self.required),
            quiet: config.quiet.unwrap_or(self.quiet),
        }
    }
}

/// Where a check definition came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Builtin,
    Plugin(PathBuf),
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Builtin => write!(f, "builtin"),
            Origin::Plugin(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A merged check plus everything the runner needs to decide whether and
/// how to run it.
pub struct CheckDefinition {
    pub check: Box<dyn Check>,
    pub origin: Origin,
    pub settings: CheckSettings,
    /// Filter from configuration, replacing the check's own filter.
    pub include: Option<FileFilter>,
}

impl CheckDefinition {
    pub fn new(check: Box<dyn Check>, origin: Origin) -> Self {
        let settings = check.defaults();
        Self {
            check,
            origin,
            settings,
            include: None,
        }
    }

    pub fn with_settings(mut self, settings: CheckSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_include(mut self, include: Option<FileFilter>) -> Self {
        self.include = include;
        self
    }

    pub fn name(&self) -> &str {
        self.check.name()
    }

    pub fn description(&self) -> &str {
        self.check.description()
    }

    pub fn filter(&self) -> Option<&FileFilter> {
        self.include.as_ref().or_else(|| self.check.file_filter())
    }

    /// Files this definition should run against, or `None` if it doesn't
    /// apply to this change set at all.
    pub fn applicable_files(&self, changed: &[PathBuf]) -> Option<Vec<PathBuf>> {
        match self.filter() {
            None => Some(changed.to_vec()),
            Some(filter) => {
                let selected = filter.select(changed);
                (!selected.is_empty()).then_some(selected)
            }
        }
    }
}

impl std::fmt::Debug for CheckDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckDefinition")
            .field("name", &self.name())
            .field("origin", &self.origin)
            .field("settings", &self.settings)
            .field("include", &self.include)
            .finish()
    }
}
