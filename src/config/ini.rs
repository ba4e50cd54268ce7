//! Minimal INI reader producing nested trees.
//!
//! ```ini
//! debug = true
//!
//! [db.primary]
//! host = localhost   ; inline comment
//! ```
//!
//! yields `{"debug": true, "db": {"primary": {"host": "localhost"}}}`.

use super::Tree;
use super::keypath::{self, DOT, KeyPath};
use super::value::coerce;
use crate::error::ParseError;

/// Name of the implicit section holding keys before any header.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// UTF-8 byte-order mark some editors write at the start of a file.
const BOM: char = '\u{feff}';

/// Parse INI text into a tree. Every value goes through coercion.
pub fn parse_ini(content: &str) -> Result<Tree, ParseError> {
    let mut data = Tree::new();
    let mut section: Vec<String> = Vec::new();
    let content = content.strip_prefix(BOM).unwrap_or(content);

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            // Anything after the last `]` is ignored.
            let end = header
                .rfind(']')
                .ok_or_else(|| ParseError::ini(line_no, "unterminated section header"))?;
            let name = header[..end].trim();
            if name.is_empty() {
                return Err(ParseError::ini(line_no, "empty section name"));
            }
            section = if name == DEFAULT_SECTION {
                Vec::new()
            } else {
                name.split(DOT).map(|s| s.trim().to_string()).collect()
            };
            continue;
        }

        let split_at = line
            .find(['=', ':'])
            .ok_or_else(|| ParseError::ini(line_no, format!("no '=' or ':' in {line:?}")))?;
        let key = line[..split_at].trim();
        if key.is_empty() {
            return Err(ParseError::ini(line_no, "empty key"));
        }
        let value = clean_value(&line[split_at + 1..]);

        keypath::set(&mut data, &KeyPath::prefixed(&section, key), coerce(value));
    }

    Ok(data)
}

/// Trim and unquote a value, or strip inline comments from an unquoted one.
///
/// A quoted value ends at its closing quote; an unterminated quote is kept
/// literally.
fn clean_value(raw: &str) -> &str {
    let value = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote)
            && let Some(end) = inner.find(quote)
        {
            return &inner[..end];
        }
    }
    match value.find(" ;").into_iter().chain(value.find(" #")).min() {
        Some(at) => value[..at].trim_end(),
        None => value,
    }
}
