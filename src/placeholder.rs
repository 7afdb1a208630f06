//! Placeholder token substitution.
//! Scans text and path segments for delimited tokens referencing a variable
//! and an optional named transform, and replaces each token with the resolved
//! value. Runs strictly after directive processing, so directive markers can
//! never collide with token resolution.

use crate::error::{Error, Result};
use crate::transforms;
use crate::vars::Variables;
use std::path::Path;

/// The two recognized delimiter styles. Both ends of a token must use the
/// same style; both styles resolve through the same machinery.
const DELIMITERS: [&str; 2] = ["___", "~~~"];

/// A resolved token interior: variable name plus optional transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub name: &'a str,
    pub transform: Option<&'a str>,
}

/// Splits a token interior into `(name, transform)`.
///
/// The variable name may itself contain `__`, so the transform is recognized
/// as the longest known-transform suffix rather than by blindly splitting on
/// the first `__`. An interior with no known transform suffix is a bare
/// variable name.
pub fn split_token(interior: &str) -> Token<'_> {
    for transform in transforms::TRANSFORMS {
        if let Some(name) = interior.strip_suffix(transform) {
            if let Some(name) = name.strip_suffix("__") {
                if !name.is_empty() {
                    return Token { name, transform: Some(transform) };
                }
            }
        }
    }
    Token { name: interior, transform: None }
}

/// Substitutes all placeholder tokens in a text, line by line.
///
/// Deterministic for a fixed dictionary; text containing no delimiters is
/// returned unchanged, so substitution is idempotent on its own output.
pub fn substitute(text: &str, vars: &Variables, file: &Path) -> Result<String> {
    let mut out = String::with_capacity(text.len());

    for (idx, line) in text.split_inclusive('\n').enumerate() {
        substitute_into(&mut out, line, vars, file, idx + 1)?;
    }

    Ok(out)
}

/// Substitutes placeholder tokens in a single path segment.
///
/// Identical grammar and resolution as file content; `file` is the template
/// entry being renamed, used only for error context.
pub fn substitute_path_segment(segment: &str, vars: &Variables, file: &Path) -> Result<String> {
    let mut out = String::with_capacity(segment.len());
    substitute_into(&mut out, segment, vars, file, 1)?;
    Ok(out)
}

/// Core scan over one line. Tokens do not nest and substituted values are
/// not rescanned.
fn substitute_into(
    out: &mut String,
    line: &str,
    vars: &Variables,
    file: &Path,
    line_no: usize,
) -> Result<()> {
    let mut rest = line;

    loop {
        let Some((open_at, delim)) = next_delimiter(rest) else {
            out.push_str(rest);
            return Ok(());
        };

        out.push_str(&rest[..open_at]);

        let after_open = &rest[open_at + delim.len()..];
        let Some(close_at) = after_open.find(delim) else {
            return Err(Error::MalformedToken {
                file: file.to_path_buf(),
                line: line_no,
                token: rest[open_at..].trim_end().to_string(),
            });
        };

        let interior = &after_open[..close_at];
        let token_text = &rest[open_at..open_at + delim.len() + close_at + delim.len()];
        let token = split_token(interior);

        let raw = vars.get(token.name).ok_or_else(|| match token.name.rsplit_once("__") {
            // The interior splits like a transform reference but the suffix
            // is not a registered transform and the whole interior is not a
            // variable either: report the unknown transform.
            Some((prefix, suffix))
                if token.transform.is_none() && vars.get(prefix).is_some() =>
            {
                Error::UnknownTransform {
                    file: file.to_path_buf(),
                    name: suffix.to_string(),
                    token: token_text.to_string(),
                }
            }
            _ => Error::UnknownVariable {
                file: file.to_path_buf(),
                name: token.name.to_string(),
                token: token_text.to_string(),
            },
        })?;

        match token.transform {
            Some(name) => {
                // Known by construction: split_token only recognizes
                // registered transforms.
                let value = transforms::apply(name, raw).ok_or_else(|| Error::UnknownTransform {
                    file: file.to_path_buf(),
                    name: name.to_string(),
                    token: token_text.to_string(),
                })?;
                out.push_str(&value);
            }
            None => out.push_str(raw),
        }

        rest = &after_open[close_at + delim.len()..];
    }
}

/// Finds the leftmost opening delimiter of either style.
fn next_delimiter(s: &str) -> Option<(usize, &'static str)> {
    DELIMITERS
        .iter()
        .filter_map(|&d| s.find(d).map(|at| (at, d)))
        .min_by_key(|&(at, _)| at)
}
