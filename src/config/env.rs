//! Environment variable extraction.
//!
//! `<APP>_DB__HOST=localhost` becomes `{"db": {"host": "localhost"}}`.
//! The prefix matches the app name as given or upper-cased; segments are
//! split on `__` and lower-cased.

use super::Tree;
use super::keypath::{self, ENV_DELIMITER, KeyPath};
use super::value::coerce;
use tracing::trace;

/// Build the environment tree for `app` from `vars`.
///
/// Variables are applied in key order so that collisions (e.g. `APP_X` and
/// `app_x` on a case-sensitive platform) resolve the same way everywhere:
/// the lexicographically last variable wins.
pub fn parse_env<'a, I>(app: &str, vars: I) -> Tree
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let prefixes = prefixes(app);
    let mut matched: Vec<(&str, &str, &str)> = vars
        .into_iter()
        .filter_map(|(key, value)| {
            let rest = prefixes.iter().find_map(|p| key.strip_prefix(p.as_str()))?;
            (!rest.is_empty()).then_some((key, rest, value))
        })
        .collect();
    matched.sort_by(|a, b| a.0.cmp(b.0));

    let mut data = Tree::new();
    for (key, rest, value) in matched {
        let path = KeyPath::parse(&rest.to_lowercase(), ENV_DELIMITER);
        trace!(var = key, path = %path, "environment override");
        keypath::set(&mut data, &path, coerce(value));
    }
    data
}

fn prefixes(app: &str) -> Vec<String> {
    let exact = format!("{app}_");
    let upper = exact.to_ascii_uppercase();
    if upper == exact {
        vec![exact]
    } else {
        vec![exact, upper]
    }
}
