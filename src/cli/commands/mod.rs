pub mod init;
pub mod list;
pub mod run;

use std::path::Path;

use anyhow::Result;

use crate::{
    checks::BuiltinSource,
    config::Config,
    contexts::HookType,
    core::{self, CheckDefinition, CheckSource, LoadWarning},
    plugins,
};

/// Checks for one hook after every source is merged and configuration is
/// applied.
pub struct LoadedChecks {
    pub definitions: Vec<CheckDefinition>,
    pub warnings: Vec<LoadWarning>,
}

/// Load the built-in catalog, then every plugin file for `hook`.
pub fn load_checks(root: &Path, config: &Config, hook: HookType) -> Result<LoadedChecks> {
    let builtin = BuiltinSource::new(hook, config);
    let discovery = plugins::discover(root, config, hook)?;

    let mut sources = vec![&builtin as &dyn CheckSource];
    sources.extend(discovery.files.iter().map(|p| p as &dyn CheckSource));

    let report = core::load(sources);
    let mut warnings = discovery.warnings;
    warnings.extend(report.warnings);
    Ok(LoadedChecks {
        definitions: report.registry.into_definitions(config),
        warnings,
    })
}
