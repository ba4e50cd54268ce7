//! Minimist-style command-line parsing into a configuration tree.
//!
//! | input               | result                     |
//! |---------------------|----------------------------|
//! | `--port=80`         | `{"port": 80}`             |
//! | `--port 80`         | `{"port": 80}`             |
//! | `--verbose`         | `{"verbose": true}`        |
//! | `--no-color`        | `{"color": false}`         |
//! | `-abc`              | `{"a": true, "b": true, "c": true}` |
//! | `--db.host x`       | `{"db": {"host": "x"}}`    |
//! | `--tag a --tag b`   | `{"tag": ["a", "b"]}`      |
//! | `file -- --literal` | `{"_": ["file", "--literal"]}` |
//!
//! Positional arguments always land under `_`.

use crate::config::Tree;
use crate::config::keypath::{self, KeyPath};
use crate::config::value::{infer_argument, is_number};
use serde_json::Value;

/// Key collecting positional arguments.
pub const POSITIONAL_KEY: &str = "_";

/// Parse command-line arguments (without the program name).
pub fn parse_args<I, S>(args: I) -> Tree
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut data = Tree::new();
    let mut positional = Vec::new();
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();
        i += 1;

        if arg == "--" {
            positional.extend(args[i..].iter().map(|a| Value::String(a.clone())));
            break;
        }

        if let Some(long) = arg.strip_prefix("--") {
            if let Some((key, value)) = long.split_once('=') {
                assign(&mut data, key, infer_argument(value));
            } else if let Some(key) = long.strip_prefix("no-") {
                assign(&mut data, key, Value::Bool(false));
            } else if let Some(value) = take_value(&args, &mut i) {
                assign(&mut data, long, value);
            } else {
                assign(&mut data, long, Value::Bool(true));
            }
        } else if let Some(short) = arg
            .strip_prefix('-')
            .filter(|s| !s.is_empty() && !is_number(arg))
        {
            if let Some((key, value)) = short.split_once('=') {
                assign(&mut data, key, infer_argument(value));
                continue;
            }
            let mut letters: Vec<char> = short.chars().collect();
            if let Some(last) = letters.pop() {
                for letter in letters {
                    assign(&mut data, &letter.to_string(), Value::Bool(true));
                }
                let value = take_value(&args, &mut i).unwrap_or(Value::Bool(true));
                assign(&mut data, &last.to_string(), value);
            }
        } else {
            positional.push(infer_argument(arg));
        }
    }

    data.insert(POSITIONAL_KEY.to_string(), Value::Array(positional));
    data
}

/// Consume the next argument as a value unless it looks like an option.
fn take_value(args: &[String], i: &mut usize) -> Option<Value> {
    let next = args.get(*i)?;
    if next.starts_with('-') && !is_number(next) {
        return None;
    }
    *i += 1;
    Some(infer_argument(next))
}

/// Set a dotted key; repeating a key collects the values into a list.
fn assign(data: &mut Tree, key: &str, value: Value) {
    let path = KeyPath::dotted(key);
    match keypath::get_mut(data, &path) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) if !existing.is_object() => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        _ => keypath::set(data, &path, value),
    }
}
