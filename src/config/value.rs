//! Best-effort inference of primitive values from raw strings.

use serde_json::{Number, Value};

const TRUE_LITERALS: &[&str] = &[
    "1", "t", "T", "true", "TRUE", "True", "YES", "yes", "Yes", "y", "ON", "on", "On",
];

const FALSE_LITERALS: &[&str] = &[
    "0", "f", "F", "false", "FALSE", "False", "NO", "no", "No", "n", "OFF", "off", "Off",
];

/// Parse one of the accepted boolean literals.
pub fn parse_bool(raw: &str) -> Option<bool> {
    if TRUE_LITERALS.contains(&raw) {
        Some(true)
    } else if FALSE_LITERALS.contains(&raw) {
        Some(false)
    } else {
        None
    }
}

/// Coerce an environment or INI value.
///
/// Tries boolean, then `i64`, then `f64`, and falls back to the string
/// itself. Each attempt must consume the whole input.
pub fn coerce(raw: &str) -> Value {
    if let Some(b) = parse_bool(raw) {
        return Value::Bool(b);
    }
    number(raw).unwrap_or_else(|| Value::String(raw.to_string()))
}

/// Coerce a command-line value.
///
/// Narrower than [`coerce`]: only `true`/`false` are booleans, so that
/// `--port 1` stays numeric.
pub fn infer_argument(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => number(raw).unwrap_or_else(|| Value::String(raw.to_string())),
    }
}

/// Whether `raw` reads as a number, e.g. `-5` passed as an option value.
pub fn is_number(raw: &str) -> bool {
    number(raw).is_some()
}

fn number(raw: &str) -> Option<Value> {
    if let Ok(i) = raw.parse::<i64>() {
        return Some(Value::Number(i.into()));
    }
    // Non-finite floats have no JSON representation.
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_table() {
        assert_eq!(coerce("true"), json!(true));
        assert_eq!(coerce("YES"), json!(true));
        assert_eq!(coerce("On"), json!(true));
        assert_eq!(coerce("n"), json!(false));
        assert_eq!(coerce("42"), json!(42));
        assert_eq!(coerce("-17"), json!(-17));
        assert_eq!(coerce("3.14"), json!(3.14));
        assert_eq!(coerce("hello"), json!("hello"));
    }

    #[test]
    fn test_bool_wins_over_integer() {
        assert_eq!(coerce("1"), json!(true));
        assert_eq!(coerce("0"), json!(false));
        assert_eq!(coerce("10"), json!(10));
    }

    #[test]
    fn test_integer_is_not_float() {
        assert!(coerce("42").as_i64().is_some());
        assert!(coerce("42.0").as_i64().is_none());
        assert_eq!(coerce("42.0").as_f64(), Some(42.0));
    }

    #[test]
    fn test_no_partial_matches() {
        assert_eq!(coerce("42abc"), json!("42abc"));
        assert_eq!(coerce("truthy"), json!("truthy"));
        assert_eq!(coerce(" 42"), json!(" 42"));
        assert_eq!(coerce("tRUE"), json!("tRUE"));
        assert_eq!(coerce(""), json!(""));
    }

    #[test]
    fn test_out_of_range_integer_falls_to_float() {
        assert_eq!(coerce("9223372036854775808"), json!(9223372036854775808.0));
    }

    #[test]
    fn test_non_finite_stays_string() {
        assert_eq!(coerce("inf"), json!("inf"));
        assert_eq!(coerce("NaN"), json!("NaN"));
    }

    #[test]
    fn test_infer_argument_keeps_small_numbers() {
        assert_eq!(infer_argument("1"), json!(1));
        assert_eq!(infer_argument("true"), json!(true));
        assert_eq!(infer_argument("yes"), json!("yes"));
        assert_eq!(infer_argument("0.5"), json!(0.5));
    }
}
