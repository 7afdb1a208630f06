//! Tree materialization.
//! Walks the template tree depth-first, renders every path segment through
//! the placeholder engine, runs file content through the directive processor
//! and then the placeholder engine, and writes the result to the output
//! tree. Directories are created before any file is written into them. Any
//! error aborts the run and discards the partial output.

use globset::GlobSet;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::directive;
use crate::error::{Error, Result};
use crate::flags::FlagConfig;
use crate::placeholder;
use crate::syntax;
use crate::vars::Variables;

/// Validates the output directory before any processing happens.
///
/// # Errors
/// * [`Error::OutputDirectoryExists`] if it exists, is non-empty and `force`
///   is not set
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();

    if output_dir.exists() && !force {
        let occupied =
            !output_dir.is_dir() || fs::read_dir(output_dir)?.next().is_some();
        if occupied {
            return Err(Error::OutputDirectoryExists(output_dir.to_path_buf()));
        }
    }

    Ok(output_dir.to_path_buf())
}

/// Materializes one template tree into one output tree.
///
/// Holds only read-only snapshots; nothing here is mutated during the walk,
/// so per-file processing has no cross-file state.
pub struct Processor<'a> {
    template_root: &'a Path,
    output_root: &'a Path,
    config: &'a FlagConfig,
    vars: &'a Variables,
    prune: GlobSet,
    manifest_path: Option<&'a Path>,
}

impl<'a> Processor<'a> {
    pub fn new(
        template_root: &'a Path,
        output_root: &'a Path,
        config: &'a FlagConfig,
        vars: &'a Variables,
        prune: GlobSet,
        manifest_path: Option<&'a Path>,
    ) -> Self {
        Self { template_root, output_root, config, vars, prune, manifest_path }
    }

    /// Renders the whole tree and returns the list of emitted files, in the
    /// order they were written.
    ///
    /// On any error the output directory is removed again if this run
    /// created it; a pre-existing directory is left in place but reported as
    /// incomplete.
    pub fn materialize(&self) -> Result<Vec<PathBuf>> {
        let created_root = !self.output_root.exists();

        match self.walk() {
            Ok(files) => Ok(files),
            Err(e) => {
                if created_root {
                    let _ = fs::remove_dir_all(self.output_root);
                } else {
                    log::error!(
                        "output tree at {} is incomplete and should be discarded",
                        self.output_root.display()
                    );
                }
                Err(e)
            }
        }
    }

    fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut dirs: Vec<(PathBuf, PathBuf)> = Vec::new();
        let mut files: Vec<(PathBuf, PathBuf)> = Vec::new();
        let mut pruned_dirs: Vec<PathBuf> = Vec::new();

        for entry in WalkDir::new(self.template_root) {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            let source = entry.path();

            if source == self.template_root {
                continue;
            }
            if self.manifest_path == Some(source) {
                continue;
            }

            let relative = source
                .strip_prefix(self.template_root)
                .map_err(|e| Error::Config(e.to_string()))?
                .to_path_buf();

            if pruned_dirs.iter().any(|d| relative.starts_with(d)) {
                continue;
            }
            if self.prune.is_match(&relative) {
                debug!("pruning {}", relative.display());
                if entry.file_type().is_dir() {
                    pruned_dirs.push(relative);
                }
                continue;
            }

            if entry.file_type().is_dir() {
                dirs.push((source.to_path_buf(), relative));
            } else {
                files.push((source.to_path_buf(), relative));
            }
        }

        // Two phases: all directories exist before any file is written.
        fs::create_dir_all(self.output_root)?;

        for (source, relative) in &dirs {
            let target = self.output_root.join(self.render_relative_path(relative, source)?);
            debug!("creating directory {}", target.display());
            fs::create_dir_all(target)?;
        }

        let mut emitted = Vec::with_capacity(files.len());

        for (source, relative) in &files {
            let target = self.output_root.join(self.render_relative_path(relative, source)?);
            debug!("rendering {} -> {}", source.display(), target.display());
            self.render_file(source, &target)?;
            emitted.push(target);
        }

        Ok(emitted)
    }

    /// Resolves placeholder tokens in every segment of a template-relative
    /// path.
    fn render_relative_path(&self, relative: &Path, source: &Path) -> Result<PathBuf> {
        let mut out = PathBuf::new();

        for component in relative.components() {
            let segment = component.as_os_str().to_str().ok_or_else(|| {
                Error::Config(format!("non-UTF-8 path: {}", source.display()))
            })?;
            let rendered = placeholder::substitute_path_segment(segment, self.vars, source)?;

            if rendered.is_empty() {
                return Err(Error::Config(format!(
                    "path segment '{}' of {} rendered to an empty name",
                    segment,
                    source.display()
                )));
            }

            out.push(rendered);
        }

        Ok(out)
    }

    /// Renders (if UTF-8 text) or copies verbatim (if binary) one source
    /// file, preserving its permissions.
    fn render_file(&self, source: &Path, target: &Path) -> Result<()> {
        let bytes = fs::read(source)?;

        match String::from_utf8(bytes) {
            Ok(text) => {
                let comment_syntax = syntax::for_path(source);
                let text = directive::process(&text, comment_syntax, self.config, source)?;
                let text = placeholder::substitute(&text, self.vars, source)?;
                fs::write(target, text)?;
                copy_permissions(source, target)?;
            }
            Err(_) => {
                // fs::copy carries the permission bits along.
                fs::copy(source, target)?;
            }
        }

        Ok(())
    }
}

#[cfg(unix)]
fn copy_permissions(source: &Path, target: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(source)?.permissions().mode();
    fs::set_permissions(target, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_permissions(_source: &Path, _target: &Path) -> Result<()> {
    Ok(())
}
