//! Operator input collection.
//! Flags are asked as yes/no confirms and variables as text inputs, in
//! manifest declaration order. A JSON object piped on stdin (`--stdin`)
//! bypasses prompting entirely for scripted runs: flags under their
//! canonical `group.name` keys, variables under their plain names; anything
//! unspecified falls back to the manifest default.

use crate::config::Manifest;
use crate::error::{Error, Result};
use crate::vars::{self, Variables};
use dialoguer::{Confirm, Input};
use indexmap::IndexMap;
use std::io::Read;

/// The operator's resolved input: raw flag choices plus the finished
/// variable dictionary.
#[derive(Debug)]
pub struct Answers {
    pub choices: IndexMap<String, bool>,
    pub variables: Variables,
}

/// Reads a JSON object of preloaded answers from stdin.
pub fn answers_from_stdin() -> Result<serde_json::Value> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    serde_json::from_str(buffer.trim())
        .map_err(|e| Error::Config(format!("invalid answers on stdin: {}", e)))
}

/// Collects all answers, either from a preloaded JSON object or
/// interactively.
///
/// Secret variables are never prompted; they are generated once per run.
pub fn collect_answers(
    manifest: &Manifest,
    preloaded: Option<serde_json::Value>,
) -> Result<Answers> {
    let choices = match &preloaded {
        Some(values) => preloaded_choices(manifest, values)?,
        None => prompt_choices(manifest)?,
    };

    let mut variables = Variables::new();

    for (name, spec) in &manifest.variables {
        if spec.secret {
            variables.insert(name.clone(), vars::generate_secret());
            continue;
        }

        let value = match &preloaded {
            Some(values) => match values.get(name) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => spec.default.clone().unwrap_or_default(),
            },
            None => {
                let question =
                    spec.question.clone().unwrap_or_else(|| format!("Value for '{}'?", name));
                let mut input = Input::<String>::new().with_prompt(question);
                if let Some(default) = &spec.default {
                    input = input.default(default.clone());
                }
                input.interact_text().map_err(|e| Error::Config(e.to_string()))?
            }
        };

        variables.insert(name.clone(), value);
    }

    Ok(Answers { choices, variables })
}

/// Extracts flag choices from a preloaded JSON object. Only keys present in
/// the object become explicit choices; everything else keeps its default.
fn preloaded_choices(
    manifest: &Manifest,
    values: &serde_json::Value,
) -> Result<IndexMap<String, bool>> {
    let mut choices = IndexMap::new();

    for (group, entries) in &manifest.flags {
        for name in entries.keys() {
            let key = format!("{}.{}", group, name);
            if let Some(value) = values.get(&key) {
                let value = value.as_bool().ok_or_else(|| {
                    Error::Config(format!("answer for flag '{}' must be a boolean", key))
                })?;
                choices.insert(key, value);
            }
        }
    }

    Ok(choices)
}

/// Asks a yes/no confirm for every declared flag, in declaration order.
fn prompt_choices(manifest: &Manifest) -> Result<IndexMap<String, bool>> {
    let mut choices = IndexMap::new();

    for (group, entries) in &manifest.flags {
        for (name, spec) in entries {
            let key = format!("{}.{}", group, name);
            let question =
                spec.question.clone().unwrap_or_else(|| format!("Enable {}?", key));

            let value = Confirm::new()
                .with_prompt(question)
                .default(spec.default)
                .interact()
                .map_err(|e| Error::Config(e.to_string()))?;

            choices.insert(key, value);
        }
    }

    Ok(choices)
}
