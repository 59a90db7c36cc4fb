use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use super::HookType;
use crate::{core::HookContext, git};

/// Context for `pre-push`: files changed since the upstream branch.
///
/// Without an upstream every tracked file is considered changed.
pub struct PrePushContext {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl PrePushContext {
    pub fn new(root: PathBuf) -> Result<Self> {
        let files = match git::files_changed_since_upstream(&root)? {
            Some(files) => files,
            None => {
                debug!("no upstream branch, checking all tracked files");
                git::tracked_files(&root)?
            }
        };
        Ok(Self { root, files })
    }
}

impl HookContext for PrePushContext {
    fn hook_name(&self) -> &str {
        HookType::PrePush.name()
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn changed_files(&self) -> &[PathBuf] {
        &self.files
    }
}
