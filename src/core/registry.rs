//! Check registry and the multi-source loader.
//!
//! Sources are loaded in priority order (built-ins first, then repository
//! plugins). A later check with an existing name replaces the earlier one in
//! place, so overriding never reorders execution; new names are appended.

use std::collections::HashMap;

use tracing::debug;

use super::{
    check::{Check, CheckDefinition, FileFilter, Origin},
    error::LoadError,
};
use crate::config::Config;

/// A catalog of checks, e.g. the built-in list or one plugin file.
pub trait CheckSource {
    /// Human-readable label used in warnings.
    fn label(&self) -> String;

    fn origin(&self) -> Origin;

    fn load(&self) -> Result<Vec<Box<dyn Check>>, LoadError>;
}

struct Entry {
    check: Box<dyn Check>,
    origin: Origin,
}

/// Ordered name -> check map with last-registration-wins semantics.
#[derive(Default)]
pub struct CheckRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `check`, replacing any check of the same name in place.
    ///
    /// Returns the origin of the replaced check, if there was one.
    pub fn register(&mut self, check: Box<dyn Check>, origin: Origin) -> Option<Origin> {
        let name = check.name().to_string();
        match self.index.get(&name) {
            Some(&pos) => {
                let previous = std::mem::replace(&mut self.entries[pos], Entry { check, origin });
                Some(previous.origin)
            }
            None => {
                self.index.insert(name, self.entries.len());
                self.entries.push(Entry { check, origin });
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Check> {
        self.index
            .get(name)
            .map(|&pos| self.entries[pos].check.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.check.name()).collect()
    }

    /// Turn the merged checks into definitions, applying per-check settings
    /// from configuration.
    pub fn into_definitions(self, config: &Config) -> Vec<CheckDefinition> {
        self.entries
            .into_iter()
            .map(|Entry { check, origin }| {
                let mut def = CheckDefinition::new(check, origin);
                if let Some(check_config) = config.checks.get(def.name()) {
                    let include = check_config.include.as_ref().and_then(|patterns| {
                        // Patterns were validated when the config was loaded.
                        FileFilter::globs(patterns).ok()
                    });
                    let settings = def.settings.apply(check_config);
                    def = def.with_settings(settings).with_include(include);
                }
                def
            })
            .collect()
    }
}

/// A source that failed to load and was skipped.
#[derive(Debug)]
pub struct LoadWarning {
    pub source: String,
    pub error: LoadError,
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skipping check source {}: {}", self.source, self.error)
    }
}

/// Result of loading all sources.
pub struct LoadReport {
    pub registry: CheckRegistry,
    pub warnings: Vec<LoadWarning>,
}

/// Load `sources` in order into a fresh registry.
///
/// A source that fails to load is recorded as a warning and skipped; it never
/// stops the remaining sources from loading.
pub fn load<'a, I>(sources: I) -> LoadReport
where
    I: IntoIterator<Item = &'a dyn CheckSource>,
{
    let mut registry = CheckRegistry::new();
    let mut warnings = Vec::new();

    for source in sources {
        let label = source.label();
        match source.load() {
            Ok(checks) => {
                debug!(source = %label, count = checks.len(), "loaded check source");
                for check in checks {
                    let name = check.name().to_string();
                    if let Some(previous) = registry.register(check, source.origin()) {
                        debug!(check = %name, %previous, by = %label, "check overridden");
                    }
                }
            }
            Err(error) => {
                debug!(source = %label, %error, "skipping check source");
                warnings.push(LoadWarning {
                    source: label,
                    error,
                });
            }
        }
    }

    LoadReport { registry, warnings }
}
