use std::path::PathBuf;

use thiserror::Error;

/// A check source that could not be loaded.
///
/// Load errors are never fatal: the loader reports them and moves on to the
/// next source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid check definition in {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// Raised by interrupt-aware helpers once the user cancels the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("interrupted by user")]
pub struct Interrupted;
