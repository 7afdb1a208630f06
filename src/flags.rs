//! Feature-flag configuration for maquette templates.
//! Resolves the manifest's flag schema plus the operator's choices into one
//! immutable snapshot that every later stage reads.

use crate::config::Manifest;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// A canonical two-segment flag path, e.g. `api.wagtail`.
///
/// Three surface separators are accepted (`.`, `__`, `~~`) and all parse to
/// the same `(group, name)` tuple, so downstream evaluation never needs to
/// know which convention a template uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlagPath {
    pub group: String,
    pub name: String,
}

/// Separators recognized in flag path surface syntax.
const SEPARATORS: [&str; 3] = [".", "__", "~~"];

impl FlagPath {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self { group: group.into(), name: name.into() }
    }

    /// Parses a flag path from any of the recognized separator conventions.
    ///
    /// Both segments must be non-empty and alphanumeric. Returns `None` for
    /// anything else, including paths with more than two segments.
    pub fn parse(raw: &str) -> Option<Self> {
        for sep in SEPARATORS {
            if let Some((group, name)) = raw.split_once(sep) {
                if is_segment(group) && is_segment(name) {
                    return Some(Self::new(group, name));
                }
                return None;
            }
        }
        None
    }
}

impl fmt::Display for FlagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

fn is_segment(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// An implication rule: whenever `when` resolves true, `then` is forced true.
#[derive(Debug, Clone)]
pub struct Implication {
    pub when: FlagPath,
    pub then: FlagPath,
}

/// The immutable flag snapshot consumed by the directive processor.
///
/// Constructed once per run by [`resolve`] and passed by reference to
/// everything downstream; there is no way to mutate it afterwards.
#[derive(Debug, Clone)]
pub struct FlagConfig {
    values: IndexMap<String, bool>,
}

impl FlagConfig {
    /// Looks up a flag path. `None` means the path is not declared, which
    /// callers must treat as a hard error, never as false.
    pub fn get(&self, path: &FlagPath) -> Option<bool> {
        self.values.get(&path.to_string()).copied()
    }

    /// Iterates over all `(canonical path, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Builds a configuration directly from canonical `group.name` keys.
    /// Intended for tests and embedding; normal runs go through [`resolve`].
    pub fn from_values(values: IndexMap<String, bool>) -> Self {
        Self { values }
    }
}

/// Resolves the operator's choices against the manifest's flag schema.
///
/// Applies schema defaults for unspecified flags, then applies the declared
/// implication rules to a fixpoint. An implication that would force true a
/// flag the operator explicitly set false is a
/// [`Error::ConflictingImplication`]. Choices naming undeclared flags are a
/// configuration error.
///
/// This runs to completion before any template file is touched, so a bad
/// configuration can never produce partial output.
pub fn resolve(manifest: &Manifest, choices: &IndexMap<String, bool>) -> Result<FlagConfig> {
    let mut values: IndexMap<String, bool> = IndexMap::new();

    for (group, entries) in &manifest.flags {
        for (name, spec) in entries {
            let path = FlagPath::new(group.clone(), name.clone());
            values.insert(path.to_string(), spec.default);
        }
    }

    let mut explicit: IndexMap<String, bool> = IndexMap::new();

    for (raw, &value) in choices {
        let path = FlagPath::parse(raw)
            .ok_or_else(|| Error::Config(format!("invalid flag path '{}'", raw)))?;
        let key = path.to_string();
        if !values.contains_key(&key) {
            return Err(Error::Config(format!("flag '{}' is not declared by the template", key)));
        }
        explicit.insert(key.clone(), value);
        values.insert(key, value);
    }

    let implications = manifest.implications()?;

    // Fixpoint: each pass can only turn flags on, so the number of passes is
    // bounded by the number of flags.
    loop {
        let mut changed = false;

        for rule in &implications {
            let when_key = rule.when.to_string();
            let then_key = rule.then.to_string();

            let when_value = *values.get(&when_key).ok_or_else(|| {
                Error::Config(format!("implication references unknown flag '{}'", when_key))
            })?;
            let then_value = *values.get(&then_key).ok_or_else(|| {
                Error::Config(format!("implication references unknown flag '{}'", then_key))
            })?;

            if when_value && !then_value {
                if explicit.get(&then_key) == Some(&false) {
                    return Err(Error::ConflictingImplication {
                        cause: when_key,
                        implied: then_key,
                    });
                }
                values.insert(then_key, true);
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    log::debug!("resolved flag configuration: {:?}", values);

    Ok(FlagConfig { values })
}
