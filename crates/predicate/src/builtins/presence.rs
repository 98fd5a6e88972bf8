//! Presence predicates
//!
//! These decide whether a value counts as "there". A field missing from the
//! tree reaches them as `null`.

use crate::ValidationError;
use crate::value_utils::{is_empty_like, value_type_name};

crate::predicate! {
    /// Fails on `null` and on the empty string.
    pub NotOptional;
    rule(input) { !(input.is_null() || input.as_str().is_some_and(str::is_empty)) }
    error(input) { ValidationError::required() }
}

crate::predicate! {
    /// Fails on `null`, `false`, zero, blank strings and empty containers.
    pub NotEmpty;
    rule(input) { !is_empty_like(input) }
    error(input) { ValidationError::new("not_empty", "Value must not be empty") }
}

crate::predicate! {
    /// Passes only `null`.
    pub NullType;
    rule(input) { input.is_null() }
    error(input) { ValidationError::type_mismatch("null", value_type_name(input)) }
}

crate::predicate! {
    pub AlwaysValid;
    rule(input) { true }
    error(input) { ValidationError::custom("unreachable") }
}

crate::predicate! {
    pub AlwaysInvalid;
    rule(input) { false }
    error(input) { ValidationError::new("always_invalid", "Value is always invalid") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Predicate;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(json!(null), false)]
    #[case(json!(""), false)]
    #[case(json!(" "), true)]
    #[case(json!(0), true)]
    #[case(json!(false), true)]
    #[case(json!([]), true)]
    fn not_optional(#[case] input: Value, #[case] expected: bool) {
        assert_eq!(NotOptional.is_valid(&input), expected);
    }

    #[rstest]
    #[case(json!(null), false)]
    #[case(json!("  "), false)]
    #[case(json!(0), false)]
    #[case(json!(0.0), false)]
    #[case(json!({}), false)]
    #[case(json!("a"), true)]
    #[case(json!(-1), true)]
    #[case(json!([null]), true)]
    fn not_empty(#[case] input: Value, #[case] expected: bool) {
        assert_eq!(NotEmpty.is_valid(&input), expected);
    }

    #[test]
    fn constants() {
        assert!(AlwaysValid.is_valid(&json!(null)));
        assert!(!AlwaysInvalid.is_valid(&json!("x")));
        assert!(NullType.is_valid(&json!(null)));
        let err = NullType.evaluate(&json!(1)).unwrap_err();
        assert_eq!(err.param("actual"), Some("number"));
    }

    #[test]
    fn required_error_code() {
        let err = NotOptional.evaluate(&json!("")).unwrap_err();
        assert_eq!(err.code, "required");
    }
}
