//! Repository-local plugin checks.
//!
//! Each JSON file under `<pluginDirectory>/<hook>/` defines one external
//! command check. Plugin files are loaded after the built-ins, so a plugin
//! that reuses a built-in name replaces it.

mod command;
mod source;

pub use command::{CommandCheck, PluginDefinition};
pub use source::{Discovery, PluginFile, discover};
