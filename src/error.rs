//! Error handling for the maquette application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for maquette operations.
///
/// Every variant is fatal: the tool either renders a complete output tree or
/// none at all. Variants carry the file path and line or token context needed
/// to fix the template or the configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    Io(#[from] io::Error),

    /// Represents errors in the template manifest or the operator's answers
    #[error("Configuration error: {0}.")]
    Config(String),

    /// An implication rule tried to force a flag the operator explicitly
    /// disabled
    #[error("flag '{implied}' is implied by '{cause}' but was explicitly disabled")]
    ConflictingImplication { cause: String, implied: String },

    /// A directive referenced a flag path absent from the configuration
    #[error("{}:{line}: unknown flag '{path}'", file.display())]
    UnknownFlag { file: PathBuf, line: usize, path: String },

    /// An `:: IF` directive was never closed before end of file
    #[error("{}:{line}: ':: IF {path}' is never closed", file.display())]
    UnmatchedIf { file: PathBuf, line: usize, path: String },

    /// An `:: ENDIF` directive appeared with no open block
    #[error("{}:{line}: ':: ENDIF' without a matching ':: IF'", file.display())]
    UnmatchedEndif { file: PathBuf, line: usize },

    /// A placeholder token referenced a variable absent from the dictionary
    #[error("{}: unknown variable '{name}' in token '{token}'", file.display())]
    UnknownVariable { file: PathBuf, name: String, token: String },

    /// A placeholder token named a transform absent from the registry
    #[error("{}: unknown transform '{name}' in token '{token}'", file.display())]
    UnknownTransform { file: PathBuf, name: String, token: String },

    /// An opening placeholder delimiter had no closing delimiter on the line
    #[error("{}:{line}: unterminated placeholder token near '{token}'", file.display())]
    MalformedToken { file: PathBuf, line: usize, token: String },

    /// The output directory already exists and contains files
    #[error("output directory '{}' already exists and is not empty (use --force to overwrite)", .0.display())]
    OutputDirectoryExists(PathBuf),
}

/// Convenience type alias for Results with maquette's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
