//! Maquette generates a new software project from a polyglot template tree.
//! It strips or retains conditional blocks based on feature flags, rewrites
//! placeholder tokens in file content and file names into concrete
//! project-specific values, and writes the resulting tree to an output
//! location.

/// Command-line interface module for the maquette application
pub mod cli;

/// Template manifest handling
/// Supports JSON and YAML formats (maquette.json, maquette.yml, maquette.yaml)
pub mod config;

/// Conditional-block directive scanning and evaluation
pub mod directive;

/// Error types and handling for the maquette application
pub mod error;

/// Feature-flag paths, implication rules and the resolved configuration
pub mod flags;

/// Post-materialization formatter collaborator
pub mod formatter;

/// Placeholder token recognition and substitution
pub mod placeholder;

/// Core tree materialization
/// Combines all components to generate the final output
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Flag-conditional path pruning
pub mod prune;

/// Comment syntax registry for the polyglot template tree
pub mod syntax;

/// Named value transforms (snake, camel, dashed, ...)
pub mod transforms;

/// The per-run variable dictionary
pub mod vars;
