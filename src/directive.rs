//! Conditional-block directive processing.
//! Scans one file's text for `:: IF <flag>` / `:: ENDIF` comment lines,
//! evaluates them against the flag configuration and emits the text with
//! directive lines removed and disabled blocks deleted.

use crate::error::{Error, Result};
use crate::flags::{FlagConfig, FlagPath};
use crate::syntax::{strip_markers, CommentSyntax};
use std::path::Path;

/// A parsed directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Open(FlagPath),
    Close,
}

/// Parses one line as a directive of the given comment syntax.
///
/// The line, once the comment markers are stripped and whitespace trimmed,
/// must equal `:: IF <flagPath>` or `:: ENDIF` exactly. Anything else,
/// including a directive marker embedded mid-line or an `IF` with more than
/// one flag path, is ordinary content.
pub fn parse_directive(line: &str, syntax: &CommentSyntax) -> Option<Directive> {
    let inner = strip_markers(line, syntax)?;
    let rest = inner.strip_prefix("::")?.trim_start();

    if rest == "ENDIF" {
        return Some(Directive::Close);
    }

    let path = rest.strip_prefix("IF ")?.trim();
    FlagPath::parse(path).map(Directive::Open)
}

/// One open block on the stack: its flag path, the line it was opened on and
/// its effective enabled state (own flag ANDed with all ancestors).
#[derive(Debug)]
struct OpenBlock {
    path: FlagPath,
    line: usize,
    enabled: bool,
}

/// Processes one file's text against the flag configuration.
///
/// A content line is kept iff the innermost enclosing block is effectively
/// enabled (or there is no enclosing block). Directive lines are always
/// dropped. Files with no recognized comment syntax pass through unchanged.
///
/// # Errors
/// * [`Error::UnknownFlag`] if a directive names an undeclared flag path
/// * [`Error::UnmatchedEndif`] on a close with no open block
/// * [`Error::UnmatchedIf`] if a block is still open at end of file
pub fn process(
    text: &str,
    syntax: Option<CommentSyntax>,
    config: &FlagConfig,
    file: &Path,
) -> Result<String> {
    let Some(syntax) = syntax else {
        return Ok(text.to_string());
    };

    let mut out = String::with_capacity(text.len());
    let mut stack: Vec<OpenBlock> = Vec::new();

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        let line_no = idx + 1;

        match parse_directive(line, &syntax) {
            Some(Directive::Open(path)) => {
                let value = config.get(&path).ok_or_else(|| Error::UnknownFlag {
                    file: file.to_path_buf(),
                    line: line_no,
                    path: path.to_string(),
                })?;
                let parent_enabled = stack.last().map(|b| b.enabled).unwrap_or(true);
                stack.push(OpenBlock {
                    path,
                    line: line_no,
                    enabled: value && parent_enabled,
                });
            }
            Some(Directive::Close) => {
                if stack.pop().is_none() {
                    return Err(Error::UnmatchedEndif {
                        file: file.to_path_buf(),
                        line: line_no,
                    });
                }
            }
            None => {
                if stack.last().map(|b| b.enabled).unwrap_or(true) {
                    out.push_str(line);
                }
            }
        }
    }

    if let Some(block) = stack.pop() {
        return Err(Error::UnmatchedIf {
            file: file.to_path_buf(),
            line: block.line,
            path: block.path.to_string(),
        });
    }

    Ok(out)
}
