//! The variable dictionary.
//! An immutable name -> raw value mapping built once per run from the
//! operator's answers plus values generated at startup (the secret key).
//! Every raw value is a string; display forms are produced on demand by the
//! named transforms.

use indexmap::IndexMap;
use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of generated secret values.
pub const SECRET_LENGTH: usize = 50;

/// Immutable variable dictionary consumed by the placeholder engine.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: IndexMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary from `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Inserts a raw value. Only used while the dictionary is being built;
    /// after the run starts the dictionary is passed around immutably.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Generates a random alphanumeric secret, once per run.
pub fn generate_secret() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(SECRET_LENGTH)
        .map(char::from)
        .collect()
}
