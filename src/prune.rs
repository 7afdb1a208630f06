//! Flag-conditional path pruning.
//! A template can declare glob patterns of paths to drop from the walk
//! entirely when a feature flag is off, so whole feature subtrees (a CMS
//! app, a websocket routing module) never reach the output.

use crate::config::PruneRule;
use crate::error::{Error, Result};
use crate::flags::{FlagConfig, FlagPath};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

/// Compiles the prune rules whose guarding flag resolved false into one glob
/// set matched against template-relative paths.
///
/// # Errors
/// * `Error::Config` if a rule names an undeclared flag or an invalid glob
pub fn build_prune_set(rules: &[PruneRule], config: &FlagConfig) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for rule in rules {
        let path = FlagPath::parse(&rule.when_false).ok_or_else(|| {
            Error::Config(format!("invalid flag path '{}' in prune rule", rule.when_false))
        })?;
        let enabled = config.get(&path).ok_or_else(|| {
            Error::Config(format!("prune rule references unknown flag '{}'", path))
        })?;

        if enabled {
            continue;
        }

        debug!("pruning paths for disabled flag '{}'", path);

        for pattern in &rule.patterns {
            builder.add(Glob::new(pattern).map_err(|e| {
                Error::Config(format!("invalid prune pattern '{}': {}", pattern, e))
            })?);
        }
    }

    builder
        .build()
        .map_err(|e| Error::Config(format!("prune rules failed to compile: {}", e)))
}
