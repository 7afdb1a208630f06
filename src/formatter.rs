//! Post-materialization formatting.
//! An external collaborator: once the output tree is complete, a formatter
//! command may be run over each emitted file, keyed by file extension. The
//! core only guarantees the formatter is invoked once per output file after
//! content is final; formatting failures do not invalidate the tree.

use crate::error::Result;
use indexmap::IndexMap;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A post-processing step invoked with the final list of emitted files.
pub trait Formatter {
    fn format(&self, files: &[PathBuf]) -> Result<()>;
}

/// A formatter that does nothing. Used when the manifest declares no
/// formatter commands.
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, _files: &[PathBuf]) -> Result<()> {
        Ok(())
    }
}

/// Runs manifest-declared shell commands per file extension, appending the
/// file path as the last argument (e.g. `py: "black -q"` runs
/// `black -q <file>` on every emitted `.py` file).
pub struct CommandFormatter {
    commands: IndexMap<String, String>,
}

impl CommandFormatter {
    pub fn new(commands: IndexMap<String, String>) -> Self {
        Self { commands }
    }

    fn command_for(&self, file: &Path) -> Option<&str> {
        let ext = file.extension()?.to_str()?;
        self.commands.get(ext).map(|s| s.as_str())
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, files: &[PathBuf]) -> Result<()> {
        for file in files {
            let Some(command) = self.command_for(file) else {
                continue;
            };

            let mut parts = command.split_whitespace();
            let Some(program) = parts.next() else {
                continue;
            };

            debug!("formatting {} with '{}'", file.display(), command);

            let status = Command::new(program).args(parts).arg(file).status();

            match status {
                Ok(status) if status.success() => {}
                Ok(status) => {
                    warn!("formatter '{}' exited with {} on {}", command, status, file.display())
                }
                Err(e) => warn!("formatter '{}' failed to start: {}", command, e),
            }
        }

        Ok(())
    }
}
