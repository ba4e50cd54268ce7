//! Config file format detection.
//!
//! Content whose first non-whitespace character is `{` is parsed as a JSON
//! object; anything else is parsed as INI.

use super::Tree;
use super::ini::parse_ini;
use crate::error::ParseError;
use regex_lite::Regex;
use std::sync::LazyLock;

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\{").expect("json sniff pattern is valid"));

/// Detected format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Ini,
}

impl Format {
    pub fn detect(content: &[u8]) -> Self {
        // Only the leading bytes matter; encoding is checked by the parser.
        if JSON_OBJECT.is_match(&String::from_utf8_lossy(content)) {
            Format::Json
        } else {
            Format::Ini
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Ini => write!(f, "ini"),
        }
    }
}

/// Parse raw file content into a tree.
pub fn parse(content: &[u8]) -> Result<Tree, ParseError> {
    match Format::detect(content) {
        Format::Json => Ok(serde_json::from_slice(content)?),
        Format::Ini => parse_ini(std::str::from_utf8(content)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_detect() {
        assert_eq!(Format::detect(b"{}"), Format::Json);
        assert_eq!(Format::detect(b"\n  \t{\"a\": 1}"), Format::Json);
        assert_eq!(Format::detect(b"a = {"), Format::Ini);
        assert_eq!(Format::detect(b"[section]"), Format::Ini);
        assert_eq!(Format::detect(b""), Format::Ini);
    }

    #[test]
    fn test_json_values_are_not_coerced() {
        let tree =
            parse(br#"{"port": "8080", "on": "yes", "nested": {"list": [1, "2"]}}"#).unwrap();
        assert_eq!(
            Value::Object(tree),
            json!({"port": "8080", "on": "yes", "nested": {"list": [1, "2"]}})
        );
    }

    #[test]
    fn test_ini_values_are_coerced() {
        let tree = parse(b"port = 8080\non = yes").unwrap();
        assert_eq!(Value::Object(tree), json!({"port": 8080, "on": true}));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(parse(br#"{"a":"#), Err(ParseError::Json(_))));
        assert!(matches!(parse(b"{} trailing"), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_invalid_utf8_ini_is_an_error() {
        assert!(matches!(parse(b"a = \xff\xfe"), Err(ParseError::Encoding(_))));
    }

    #[test]
    fn test_empty_content_is_empty_tree() {
        assert!(parse(b"").unwrap().is_empty());
        assert!(parse(b"\n; only a comment\n").unwrap().is_empty());
    }
}
