use std::path::{Component, Path, PathBuf};

use anyhow::Result;

use super::HookType;
use crate::{core::HookContext, git};

/// Context over an explicit set of files, with no environment changes.
///
/// Used for manual runs (`--files`, `--all-files`) of a hook's checks.
pub struct FileListContext {
    hook: HookType,
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl FileListContext {
    /// `files` may be absolute or relative to `root`; they're stored relative
    /// with `.` and `..` resolved, so path-based checks see the real location.
    pub fn new(hook: HookType, root: PathBuf, files: Vec<PathBuf>) -> Self {
        let root = normalize(&root);
        let files = files
            .into_iter()
            .map(|f| normalize(&f))
            .map(|f| match f.strip_prefix(&root) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => f,
            })
            .collect();
        Self { hook, root, files }
    }

    pub fn all_files(hook: HookType, root: PathBuf) -> Result<Self> {
        let files = git::tracked_files(&root)?;
        Ok(Self { hook, root, files })
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

impl HookContext for FileListContext {
    fn hook_name(&self) -> &str {
        self.hook.name()
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn changed_files(&self) -> &[PathBuf] {
        &self.files
    }
}
