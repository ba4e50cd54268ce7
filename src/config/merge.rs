//! Deep merge of configuration trees.
//!
//! Mappings are merged key by key, recursively. Everything else (scalars,
//! lists, nulls) in the overlay replaces the base value outright.

use super::Tree;
use serde_json::Value;

/// Deep merge `overlay` into `base`, with `overlay` taking precedence.
///
/// - Mappings present on both sides are merged recursively
/// - Any other overlay value replaces the base value entirely, including
///   lists (no concatenation) and `null`
///
/// # Example
/// ```
/// use rc_cascade::config::{Tree, deep_merge};
/// use serde_json::json;
///
/// let mut base: Tree = serde_json::from_value(json!({
///     "server": { "port": 8080, "host": "localhost" },
///     "features": ["a", "b"]
/// })).unwrap();
/// let overlay: Tree = serde_json::from_value(json!({
///     "server": { "port": 9000 },
///     "features": ["c"]
/// })).unwrap();
/// deep_merge(&mut base, overlay);
/// assert_eq!(
///     serde_json::Value::Object(base),
///     json!({ "server": { "port": 9000, "host": "localhost" }, "features": ["c"] })
/// );
/// ```
pub fn deep_merge(base: &mut Tree, overlay: Tree) {
    for (key, overlay_value) in overlay {
        if let Value::Object(overlay_map) = overlay_value {
            if let Some(Value::Object(base_map)) = base.get_mut(&key) {
                deep_merge(base_map, overlay_map);
                continue;
            }
            base.insert(key, Value::Object(overlay_map));
        } else {
            base.insert(key, overlay_value);
        }
    }
}

/// Merge `overlays` left to right onto `base`; later overlays win.
///
/// A `None` base is an empty mapping and `None` overlays are skipped.
pub fn merge<I>(base: Option<Tree>, overlays: I) -> Tree
where
    I: IntoIterator<Item = Option<Tree>>,
{
    overlays
        .into_iter()
        .flatten()
        .fold(base.unwrap_or_default(), |mut acc, overlay| {
            deep_merge(&mut acc, overlay);
            acc
        })
}

/// Merge a list of trees in order, with later trees taking precedence.
pub fn merge_all(trees: impl IntoIterator<Item = Tree>) -> Tree {
    merge(None, trees.into_iter().map(Some))
}
