//! Key path addressing over nested configuration trees.
//!
//! A key path is a non-empty list of segments. All segments but the last
//! name intermediate mappings; the last names the leaf.

use super::Tree;
use serde_json::Value;
use std::fmt;

/// Delimiter for dotted keys (`db.host`) and INI section names.
pub const DOT: &str = ".";

/// Delimiter between segments of an environment variable name.
pub const ENV_DELIMITER: &str = "__";

/// An ordered, non-empty sequence of key segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Split a compound key on `delimiter`.
    ///
    /// Splitting always yields at least one segment, so this cannot fail.
    pub fn parse(key: &str, delimiter: &str) -> Self {
        Self {
            segments: key.split(delimiter).map(str::to_string).collect(),
        }
    }

    /// Split a compound key on `.`.
    pub fn dotted(key: &str) -> Self {
        Self::parse(key, DOT)
    }

    /// Build a path from explicit segments, or `None` if there are none.
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The intermediate segments (empty for a single-segment path).
    pub fn head(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// The final segment.
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Prepend `prefix` segments, e.g. an INI section onto a key.
    pub fn prefixed(prefix: &[String], leaf: impl Into<String>) -> Self {
        let mut segments = prefix.to_vec();
        segments.push(leaf.into());
        Self { segments }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(DOT))
    }
}

/// Look up the value at `path`.
///
/// Returns `None` if any intermediate value is missing or not a mapping,
/// or if the leaf key is absent.
pub fn get<'a>(tree: &'a Tree, path: &KeyPath) -> Option<&'a Value> {
    let mut current = tree;
    for segment in path.head() {
        match current.get(segment) {
            Some(Value::Object(child)) => current = child,
            _ => return None,
        }
    }
    current.get(path.leaf())
}

/// Mutable variant of [`get`].
pub fn get_mut<'a>(tree: &'a mut Tree, path: &KeyPath) -> Option<&'a mut Value> {
    let mut current = tree;
    for segment in path.head() {
        match current.get_mut(segment) {
            Some(Value::Object(child)) => current = child,
            _ => return None,
        }
    }
    current.get_mut(path.leaf())
}

/// Assign `value` at `path`, creating intermediate mappings as needed.
///
/// Any non-mapping value in the way is replaced by an empty mapping. The
/// leaf is overwritten, never merged.
pub fn set(tree: &mut Tree, path: &KeyPath, value: Value) {
    let mut current = tree;
    for segment in path.head() {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Tree::new()));
        if !slot.is_object() {
            *slot = Value::Object(Tree::new());
        }
        let Some(child) = slot.as_object_mut() else {
            return;
        };
        current = child;
    }
    current.insert(path.leaf().to_string(), value);
}

/// Dotted-key access on a [`Tree`].
///
/// ```
/// use rc_cascade::config::{Tree, TreePath};
/// use serde_json::json;
///
/// let mut tree = Tree::new();
/// tree.set_path("db.host", json!("localhost"));
/// assert_eq!(tree.get_path("db.host"), Some(&json!("localhost")));
/// assert_eq!(tree.get_path("db.port"), None);
/// ```
pub trait TreePath {
    fn get_path(&self, key: &str) -> Option<&Value>;
    fn set_path(&mut self, key: &str, value: Value);
}

impl TreePath for Tree {
    fn get_path(&self, key: &str) -> Option<&Value> {
        get(self, &KeyPath::dotted(key))
    }

    fn set_path(&mut self, key: &str, value: Value) {
        set(self, &KeyPath::dotted(key), value)
    }
}
