//! Named transforms for placeholder values.
//! Each transform is a pure function from a raw variable value to a display
//! string. All of them lean on a smart name splitter that understands both
//! CamelCase and snake_case, including camel case abbreviations like
//! `setIBAN`. Non-ASCII letters are transliterated before splitting.

use deunicode::deunicode;
use regex::Regex;
use std::sync::LazyLock;

static IS_CAMEL_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z][a-z]*").unwrap());
static IS_NUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static IS_ABBREV: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]{2,}").unwrap());
static IS_SNAKE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]+").unwrap());

/// Transform names known to the registry, longest first so that suffix
/// matching in the placeholder engine is unambiguous.
pub const TRANSFORMS: [&str; 7] = [
    "natural_double_quoted",
    "camel_low",
    "camel_up",
    "snake_up",
    "natural",
    "dashed",
    "snake",
];

/// Whether `name` addresses a known transform.
pub fn is_transform(name: &str) -> bool {
    TRANSFORMS.contains(&name)
}

/// Applies the named transform to a raw value. `None` for unknown names.
pub fn apply(name: &str, raw: &str) -> Option<String> {
    let result = match name {
        "natural" => raw.to_string(),
        "natural_double_quoted" => double_quoted(raw),
        "snake" => smart_split(raw).join("_"),
        "snake_up" => smart_split(raw).join("_").to_uppercase(),
        "dashed" => smart_split(raw).join("-"),
        "camel_up" => camel(&smart_split(raw), true),
        "camel_low" => camel(&smart_split(raw), false),
        _ => return None,
    };
    Some(result)
}

/// Splits a name into its lowercase parts.
///
/// Understands CamelCase words, digit runs, snake_case words and uppercase
/// abbreviations; an abbreviation followed by a lowercase letter donates its
/// last capital to the next word (`getIDOfUser` -> get, id, of, user).
/// Everything that isn't letters or numbers is discarded.
pub fn smart_split(s: &str) -> Vec<String> {
    let s = deunicode(s);
    let mut out: Vec<String> = Vec::new();
    let mut pos = 0;

    while pos < s.len() {
        let m_camel = IS_CAMEL_WORD.find_at(&s, pos);
        let m_num = IS_NUM.find_at(&s, pos);
        let m_abbrev = IS_ABBREV.find_at(&s, pos);
        let m_snake = IS_SNAKE_WORD.find_at(&s, pos);

        let match_pos = [&m_camel, &m_num, &m_abbrev, &m_snake]
            .iter()
            .filter_map(|m| m.as_ref().map(|m| m.start()))
            .min();

        let Some(match_pos) = match_pos else {
            break;
        };

        if let Some(m) = m_abbrev.filter(|m| m.start() == match_pos) {
            if m.end() == s.len() {
                out.push(m.as_str().to_string());
                pos = m.end();
            } else if s.as_bytes()[m.end()].is_ascii_lowercase() {
                // Last capital belongs to the following camel word.
                out.push(s[m.start()..m.end() - 1].to_string());
                pos = m.end() - 1;
            } else {
                out.push(m.as_str().to_string());
                pos = m.end();
            }
        } else if let Some(m) = m_num.filter(|m| m.start() == match_pos) {
            out.push(m.as_str().to_string());
            pos = m.end();
        } else if let Some(m) = m_camel.filter(|m| m.start() == match_pos) {
            out.push(m.as_str().to_string());
            pos = m.end();
        } else if let Some(m) = m_snake.filter(|m| m.start() == match_pos) {
            out.push(m.as_str().to_string());
            pos = m.end();
        } else {
            pos += 1;
        }
    }

    out.into_iter().map(|x| x.to_lowercase()).collect()
}

/// Joins split parts into a CamelCase name. Adjacent numeric parts are
/// separated with an underscore so they cannot merge back together.
fn camel(parts: &[String], upper_first: bool) -> String {
    let mut out = String::new();
    let mut was_num = false;

    for (i, part) in parts.iter().enumerate() {
        let is_num = part.chars().all(|c| c.is_ascii_digit());

        if was_num && is_num {
            out.push('_');
        }

        if i == 0 && !upper_first {
            out.push_str(part);
        } else {
            out.push_str(&title(part));
        }

        was_num = is_num;
    }

    out
}

/// Uppercases the first character of an already-lowercase part.
fn title(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Escapes a value for inclusion inside a double-quoted string: the JSON
/// string encoding of the value, without the surrounding quotes.
fn double_quoted(raw: &str) -> String {
    let encoded = serde_json::to_string(raw).unwrap_or_else(|_| raw.to_string());
    encoded
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(&encoded)
        .to_string()
}
