//! Utility functions for working with serde_json::Value

use serde_json::{Number, Value};

/// Get the type name of a Value for error messages
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Extract f64 from Number, trying both f64 and i64 representations
#[inline]
pub fn number_as_f64(num: &Number) -> Option<f64> {
    num.as_f64().or_else(|| num.as_i64().map(|i| i as f64))
}

/// Check if a number is stored as an integer
#[inline]
pub fn is_integer_number(num: &Number) -> bool {
    num.is_i64() || num.is_u64()
}

/// Numeric view of a number or a numeric string
pub fn as_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => number_as_f64(n),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Check if a string spells an integer (optional sign, digits only)
pub fn is_integer_str(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Check if a value is a scalar (not null, not a container)
#[inline]
pub fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

/// Check if a value is empty in the loose sense: null, false, 0, a blank
/// string, or an empty container.
pub fn is_empty_like(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Number(n) => number_as_f64(n).is_some_and(|f| f == 0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::Object(obj) => obj.is_empty(),
    }
}

/// Textual form used when comparing scalars against strings
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_value_type_name() {
        assert_eq!(value_type_name(&Value::Null), "null");
        assert_eq!(value_type_name(&Value::Bool(true)), "boolean");
        assert_eq!(value_type_name(&json!(42)), "number");
        assert_eq!(value_type_name(&json!("test")), "string");
        assert_eq!(value_type_name(&json!([])), "array");
        assert_eq!(value_type_name(&json!({})), "object");
    }

    #[rstest]
    #[case(json!(3), Some(3.0))]
    #[case(json!(2.5), Some(2.5))]
    #[case(json!(" 7 "), Some(7.0))]
    #[case(json!("1e3"), Some(1000.0))]
    #[case(json!("abc"), None)]
    #[case(json!(true), None)]
    fn test_as_numeric(#[case] value: Value, #[case] expected: Option<f64>) {
        assert_eq!(as_numeric(&value), expected);
    }

    #[rstest]
    #[case("42", true)]
    #[case("-42", true)]
    #[case("+0", true)]
    #[case("4.2", false)]
    #[case("-", false)]
    #[case("", false)]
    fn test_is_integer_str(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_integer_str(input), expected);
    }

    #[test]
    fn test_is_empty_like() {
        assert!(is_empty_like(&Value::Null));
        assert!(is_empty_like(&json!(false)));
        assert!(is_empty_like(&json!(0)));
        assert!(is_empty_like(&json!("  ")));
        assert!(is_empty_like(&json!({})));
        assert!(!is_empty_like(&json!("0")));
        assert!(!is_empty_like(&json!([0])));
    }
}
