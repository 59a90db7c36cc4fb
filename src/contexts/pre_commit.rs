use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use tempfile::NamedTempFile;
use tracing::debug;

use super::HookType;
use crate::{core::HookContext, git};

/// Context for `pre-commit`: checks see exactly what is about to be
/// committed.
///
/// Setup saves unstaged modifications of tracked files as a patch and resets
/// the working tree to the index; cleanup re-applies the patch.
pub struct PreCommitContext {
    root: PathBuf,
    files: Vec<PathBuf>,
    stashed: Option<NamedTempFile>,
}

impl PreCommitContext {
    pub fn new(root: PathBuf) -> Result<Self> {
        let files = git::staged_files(&root)?;
        Ok(Self {
            root,
            files,
            stashed: None,
        })
    }
}

impl HookContext for PreCommitContext {
    fn hook_name(&self) -> &str {
        HookType::PreCommit.name()
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn changed_files(&self) -> &[PathBuf] {
        &self.files
    }

    fn setup_environment(&mut self) -> Result<()> {
        // Resetting the tree mid-merge would lose the resolution state.
        if git::merge_in_progress(&self.root)? {
            debug!("merge in progress, not hiding unstaged changes");
            return Ok(());
        }

        let patch = git::unstaged_patch(&self.root)?;
        if patch.is_empty() {
            return Ok(());
        }

        let mut file = tempfile::Builder::new()
            .prefix("hookguard-")
            .suffix(".patch")
            .tempfile()
            .context("Failed to create patch file for unstaged changes")?;
        file.write_all(&patch)
            .and_then(|_| file.flush())
            .context("Failed to save unstaged changes")?;
        debug!(patch = %file.path().display(), "hiding unstaged changes");

        // Recorded before touching the tree so cleanup restores a partial reset.
        self.stashed = Some(file);
        git::checkout_index(&self.root)
    }

    fn cleanup_environment(&mut self) -> Result<()> {
        let Some(patch) = self.stashed.take() else {
            return Ok(());
        };

        if let Err(err) = git::apply_patch(&self.root, patch.path()) {
            let (_, kept) = patch
                .keep()
                .context("Failed to keep patch of unstaged changes")?;
            bail!(
                "{:#}\nYour unstaged changes were saved to {}",
                err,
                kept.display()
            );
        }
        debug!("restored unstaged changes");
        Ok(())
    }
}
