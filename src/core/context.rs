//! Execution context contract and its lifecycle guard.

use std::{
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};

use anyhow::Result;
use colored::Colorize;

/// Environment facts for one run of a hook.
///
/// The context is constructed once per run. `setup_environment` runs before
/// the first check and `cleanup_environment` exactly once afterwards, on every
/// exit path.
pub trait HookContext {
    /// Name of the action being verified, e.g. `pre-commit`. Display only.
    fn hook_name(&self) -> &str;

    /// Repository root that changed file paths are relative to.
    fn root(&self) -> &Path;

    /// Paths relevant to the pending action. Read-only for the whole run.
    fn changed_files(&self) -> &[PathBuf];

    fn setup_environment(&mut self) -> Result<()> {
        Ok(())
    }

    fn cleanup_environment(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Scoped acquisition of a context's environment.
///
/// Cleanup runs when the guard is dropped, including during unwinding, and
/// also after a failed [`EnvironmentGuard::setup`] so partial setup is
/// released.
pub struct EnvironmentGuard<'a, C: HookContext + ?Sized> {
    ctx: &'a mut C,
}

impl<'a, C: HookContext + ?Sized> EnvironmentGuard<'a, C> {
    pub fn new(ctx: &'a mut C) -> Self {
        Self { ctx }
    }

    pub fn setup(&mut self) -> Result<()> {
        self.ctx.setup_environment()
    }
}

impl<C: HookContext + ?Sized> Deref for EnvironmentGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: HookContext + ?Sized> DerefMut for EnvironmentGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx
    }
}

impl<C: HookContext + ?Sized> Drop for EnvironmentGuard<'_, C> {
    fn drop(&mut self) {
        if let Err(err) = self.ctx.cleanup_environment() {
            eprintln!(
                "{} failed to restore {} environment: {:#}",
                "warning:".bold().yellow(),
                self.ctx.hook_name(),
                err
            );
        }
    }
}
