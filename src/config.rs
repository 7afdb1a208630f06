//! Manifest handling for maquette templates.
//! A template declares its flag schema, implication rules, variable questions,
//! prune rules and formatter commands in a manifest file at the template root
//! (maquette.json, maquette.yml or maquette.yaml). The manifest itself is
//! never copied to the output tree.

use crate::error::{Error, Result};
use crate::flags::{FlagPath, Implication};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Supported manifest file names, tried in order.
pub const MANIFEST_FILES: [&str; 3] = ["maquette.json", "maquette.yml", "maquette.yaml"];

/// One declared flag: an optional prompt and a default value.
#[derive(Debug, Clone, Deserialize)]
pub struct FlagSpec {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub default: bool,
}

/// One declared variable.
///
/// A variable is either asked from the operator (with `question` and an
/// optional `default`) or generated once per run (`secret: true` produces a
/// random alphanumeric value and never prompts).
#[derive(Debug, Clone, Deserialize)]
pub struct VariableSpec {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub secret: bool,
}

/// A raw implication rule as written in the manifest; flag paths are kept as
/// strings here and parsed during flag resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct ImplicationSpec {
    pub when: String,
    pub then: String,
}

/// Paths to drop from the walk entirely when a flag resolves false.
#[derive(Debug, Clone, Deserialize)]
pub struct PruneRule {
    pub when_false: String,
    pub patterns: Vec<String>,
}

/// Parsed template manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Flag schema: group name -> flag name -> spec.
    #[serde(default)]
    pub flags: IndexMap<String, IndexMap<String, FlagSpec>>,

    /// Implication rules, applied at configuration resolution time.
    #[serde(default)]
    pub implies: Vec<ImplicationSpec>,

    /// Variable questions, prompted in declaration order.
    #[serde(default)]
    pub variables: IndexMap<String, VariableSpec>,

    /// Flag-conditional path pruning.
    #[serde(default)]
    pub prune: Vec<PruneRule>,

    /// Formatter commands keyed by file extension, e.g. `py: "black -q"`.
    #[serde(default)]
    pub format: IndexMap<String, String>,
}

impl Manifest {
    /// Parses the `implies` section into canonical flag paths.
    pub fn implications(&self) -> Result<Vec<Implication>> {
        self.implies
            .iter()
            .map(|spec| {
                let when = FlagPath::parse(&spec.when).ok_or_else(|| {
                    Error::Config(format!("invalid flag path '{}' in implication", spec.when))
                })?;
                let then = FlagPath::parse(&spec.then).ok_or_else(|| {
                    Error::Config(format!("invalid flag path '{}' in implication", spec.then))
                })?;
                Ok(Implication { when, then })
            })
            .collect()
    }
}

/// Parses manifest content, trying JSON first and falling back to YAML.
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    match serde_json::from_str(content) {
        Ok(manifest) => Ok(manifest),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("invalid manifest format: {}", e))),
    }
}

/// Loads the manifest from a template directory, trying multiple file names.
///
/// Returns the parsed manifest and the path it was loaded from, so the walk
/// can exclude the manifest file from the output tree.
pub fn load_manifest<P: AsRef<Path>>(template_root: P) -> Result<(Manifest, PathBuf)> {
    for file in MANIFEST_FILES {
        let manifest_path = template_root.as_ref().join(file);
        if manifest_path.exists() {
            debug!("Loading manifest from {}", manifest_path.display());
            let content = std::fs::read_to_string(&manifest_path).map_err(Error::Io)?;
            return Ok((parse_manifest(&content)?, manifest_path));
        }
    }

    Err(Error::Config(format!(
        "no manifest file found (tried: {})",
        MANIFEST_FILES.join(", ")
    )))
}
