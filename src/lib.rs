//! Hookguard - pluggable pre-action verification runner
//!
//! Hookguard runs an ordered set of checks against the files a git action
//! (commit, push) is about to touch, reports each result as it completes and
//! reduces them to a single verdict: pass, needs attention, or fail.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporters)
//! - `config`: Configuration file loading and parsing
//! - `core`: Orchestration engine (registry, runner, contexts, statuses)
//! - `checks`: Built-in check catalog
//! - `plugins`: Repository-local command checks
//! - `contexts`: Hook execution contexts
//! - `git`: Thin wrappers over the git command line
//! - `logging`: Diagnostic logging setup

// `core` first: `enum_dispatch` must see `Check` before `BuiltinCheck`.
pub mod core;

pub mod checks;
pub mod cli;
pub mod config;
pub mod contexts;
pub mod git;
pub mod logging;
pub mod plugins;
