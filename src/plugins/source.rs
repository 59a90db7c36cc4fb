use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use tracing::debug;

use super::command::{CommandCheck, PluginDefinition};
use crate::{
    config::Config,
    contexts::HookType,
    core::{Check, CheckSource, LoadError, LoadWarning, Origin},
};

/// One plugin definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginFile {
    path: PathBuf,
    /// Path as shown to the user, relative to the repository root.
    display: PathBuf,
}

impl PluginFile {
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let display = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        Self { path, display }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_name(&self, definition: &PluginDefinition) -> Option<String> {
        definition.name.clone().or_else(|| {
            self.path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_string)
        })
    }
}

impl CheckSource for PluginFile {
    fn label(&self) -> String {
        self.display.display().to_string()
    }

    fn origin(&self) -> Origin {
        Origin::Plugin(self.display.clone())
    }

    fn load(&self) -> Result<Vec<Box<dyn Check>>, LoadError> {
        let content = fs::read_to_string(&self.path).map_err(|source| LoadError::Read {
            path: self.display.clone(),
            source,
        })?;
        let definition: PluginDefinition =
            serde_json::from_str(&content).map_err(|source| LoadError::Parse {
                path: self.display.clone(),
                source,
            })?;

        let invalid = |reason: String| LoadError::Invalid {
            path: self.display.clone(),
            reason,
        };
        let name = self
            .check_name(&definition)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| invalid("missing check name".to_string()))?;
        let check: Box<dyn Check> =
            Box::new(CommandCheck::from_definition(name, definition).map_err(invalid)?);

        Ok(vec![check])
    }
}

/// Plugin files found for one hook, plus entries that could not be read.
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<PluginFile>,
    pub warnings: Vec<LoadWarning>,
}

/// Find plugin files for `hook`, in configured directory order and sorted by
/// file name within each directory.
///
/// Unreadable directory entries become load warnings instead of vanishing.
pub fn discover(root: &Path, config: &Config, hook: HookType) -> Result<Discovery> {
    let escaped_root = Pattern::escape(&root.to_string_lossy());
    let mut discovery = Discovery::default();

    for dir in &config.plugin_directories {
        let pattern = format!("{}/{}/{}/*.json", escaped_root, dir, hook.name());
        let entries = glob::glob(&pattern)
            .with_context(|| format!("Invalid plugin directory: \"{}\"", dir))?
            .map(|entry| entry.map_err(|err| (err.path().to_path_buf(), err.into_error())));
        let mut found = collect_entries(root, entries, &mut discovery.warnings);
        found.sort();
        debug!(directory = %dir, count = found.len(), "discovered plugin files");

        discovery
            .files
            .extend(found.into_iter().map(|path| PluginFile::new(root, path)));
    }

    Ok(discovery)
}

fn collect_entries<I>(root: &Path, entries: I, warnings: &mut Vec<LoadWarning>) -> Vec<PathBuf>
where
    I: IntoIterator<Item = Result<PathBuf, (PathBuf, io::Error)>>,
{
    let mut found = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => found.push(path),
            Ok(_) => {}
            Err((path, source)) => {
                let display = PluginFile::new(root, path).display;
                warnings.push(LoadWarning {
                    source: display.display().to_string(),
                    error: LoadError::Read {
                        path: display,
                        source,
                    },
                });
            }
        }
    }
    found
}
