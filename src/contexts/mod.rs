//! Execution contexts for the supported hooks.
//!
//! - `pre_commit`: staged files, with unstaged edits hidden while checks run
//! - `pre_push`: files changed since the upstream branch
//! - `file_list`: an explicit list of files, for manual runs

mod file_list;
mod pre_commit;
mod pre_push;

pub use file_list::FileListContext;
pub use pre_commit::PreCommitContext;
pub use pre_push::PrePushContext;

use clap::ValueEnum;

/// Git hook a run is verifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum HookType {
    #[default]
    PreCommit,
    PrePush,
}

impl HookType {
    pub fn name(&self) -> &'static str {
        match self {
            HookType::PreCommit => "pre-commit",
            HookType::PrePush => "pre-push",
        }
    }
}

impl std::fmt::Display for HookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
