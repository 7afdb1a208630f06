//! Comment syntax registry.
//! Directive lines are comment lines, so recognizing them across a polyglot
//! template tree means knowing each file type's comment markers. The set of
//! syntaxes is closed and selected by file extension or well-known file name;
//! files with no recognized syntax simply cannot contain directives.

use std::path::Path;

/// A comment marker pair: an opening marker and an optional closing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    pub open: &'static str,
    pub close: Option<&'static str>,
}

/// `#` line comments (Python, shell, YAML, TOML, ...).
pub const HASH: CommentSyntax = CommentSyntax { open: "#", close: None };

/// `//` line comments (JavaScript, TypeScript, Rust, Go, ...).
pub const SLASH: CommentSyntax = CommentSyntax { open: "//", close: None };

/// `<!-- -->` comments (HTML, XML, Markdown, Vue templates).
pub const MARKUP: CommentSyntax = CommentSyntax { open: "<!--", close: Some("-->") };

/// `/* */` block comments (CSS, SCSS).
pub const BLOCK: CommentSyntax = CommentSyntax { open: "/*", close: Some("*/") };

/// `--` line comments (SQL).
pub const DASHES: CommentSyntax = CommentSyntax { open: "--", close: None };

/// Selects the comment syntax for a file, by extension first and by
/// well-known file name otherwise. Returns `None` for unrecognized files,
/// which pass through the directive stage unchanged.
pub fn for_path(path: &Path) -> Option<CommentSyntax> {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        return by_extension(ext);
    }

    let name = path.file_name().and_then(|n| n.to_str())?;
    by_file_name(name)
}

fn by_extension(ext: &str) -> Option<CommentSyntax> {
    match ext {
        "py" | "sh" | "bash" | "rb" | "yml" | "yaml" | "toml" | "cfg" | "ini" | "env"
        | "properties" => Some(HASH),
        "js" | "mjs" | "cjs" | "ts" | "mts" | "vue" | "rs" | "go" | "java" | "kt" | "c"
        | "h" | "cpp" | "hpp" | "scss" | "sass" | "less" => Some(SLASH),
        "html" | "htm" | "xml" | "svg" | "md" => Some(MARKUP),
        "css" => Some(BLOCK),
        "sql" => Some(DASHES),
        _ => None,
    }
}

fn by_file_name(name: &str) -> Option<CommentSyntax> {
    match name {
        "Dockerfile" | "Makefile" | "Procfile" | ".gitignore" | ".dockerignore"
        | ".editorconfig" | ".env" | ".flake8" => Some(HASH),
        _ => None,
    }
}

/// Strips the syntax's comment markers from a trimmed line, returning the
/// commented-out interior. `None` if the line is not a whole-line comment of
/// this syntax.
pub fn strip_markers<'a>(line: &'a str, syntax: &CommentSyntax) -> Option<&'a str> {
    let inner = line.trim().strip_prefix(syntax.open)?;
    let inner = match syntax.close {
        Some(close) => inner.trim_end().strip_suffix(close)?,
        None => inner,
    };
    Some(inner.trim())
}
