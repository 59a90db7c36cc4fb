//! User interruption (Ctrl-C) handling.
//!
//! The runner never lets SIGINT kill the process: the signal only trips a
//! shared flag. Checks and the process helper observe the flag, and the runner
//! turns it into an orderly stop so the environment cleanup still runs.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use anyhow::{Context, Result};

use super::error::Interrupted;

/// Cloneable cancellation flag shared between the signal listener, the runner
/// and running checks.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Return `Err(Interrupted)` once the flag has been tripped.
    ///
    /// Long-running checks call this between units of work.
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.is_triggered() {
            Err(Interrupted)
        } else {
            Ok(())
        }
    }

    /// Route Ctrl-C to this flag for the rest of the process lifetime.
    ///
    /// The listener runs on its own thread with a current-thread runtime, so
    /// the caller stays fully synchronous.
    pub fn install_ctrl_c(&self) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start signal listener runtime")?;

        let interrupt = self.clone();
        thread::Builder::new()
            .name("hookguard-ctrl-c".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while tokio::signal::ctrl_c().await.is_ok() {
                        tracing::debug!("received Ctrl-C");
                        interrupt.trigger();
                    }
                });
            })
            .context("Failed to spawn signal listener thread")?;

        Ok(())
    }
}
