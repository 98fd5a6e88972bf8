//! JSON type predicates
//!
//! `*Type` predicates check the stored JSON type. `*Val` predicates are
//! looser and also accept a string spelling of the value.

use crate::ValidationError;
use crate::value_utils::{as_numeric, is_integer_number, is_integer_str, is_scalar, value_type_name};
use serde_json::Value;

crate::predicate! {
    pub StringType;
    rule(input) { input.is_string() }
    error(input) { ValidationError::type_mismatch("string", value_type_name(input)) }
}

crate::predicate! {
    /// A number stored as an integer.
    pub IntType;
    rule(input) { input.as_number().is_some_and(is_integer_number) }
    error(input) { ValidationError::type_mismatch("integer", value_type_name(input)) }
}

crate::predicate! {
    /// A number stored as a float (`1.0` counts, `1` does not).
    pub FloatType;
    rule(input) { input.as_number().is_some_and(serde_json::Number::is_f64) }
    error(input) { ValidationError::type_mismatch("float", value_type_name(input)) }
}

crate::predicate! {
    /// A number, or a string that parses as one.
    pub NumericVal;
    rule(input) { as_numeric(input).is_some() }
    error(input) { ValidationError::invalid_format("numeric") }
}

crate::predicate! {
    /// An integer number, or a string of digits with an optional sign.
    pub IntVal;
    rule(input) {
        match input {
            Value::Number(n) => is_integer_number(n),
            Value::String(s) => is_integer_str(s),
            _ => false,
        }
    }
    error(input) { ValidationError::invalid_format("integer") }
}

crate::predicate! {
    pub BoolType;
    rule(input) { input.is_boolean() }
    error(input) { ValidationError::type_mismatch("boolean", value_type_name(input)) }
}

crate::predicate! {
    pub ArrayType;
    rule(input) { input.is_array() }
    error(input) { ValidationError::type_mismatch("array", value_type_name(input)) }
}

crate::predicate! {
    pub ObjectType;
    rule(input) { input.is_object() }
    error(input) { ValidationError::type_mismatch("object", value_type_name(input)) }
}

crate::predicate! {
    /// A string, number or boolean.
    pub ScalarVal;
    rule(input) { is_scalar(input) }
    error(input) { ValidationError::type_mismatch("scalar", value_type_name(input)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Predicate;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(1), true, false)]
    #[case(json!(-7), true, false)]
    #[case(json!(1.0), false, true)]
    #[case(json!(2.5), false, true)]
    #[case(json!("1"), false, false)]
    fn int_and_float(#[case] input: Value, #[case] int: bool, #[case] float: bool) {
        assert_eq!(IntType.is_valid(&input), int);
        assert_eq!(FloatType.is_valid(&input), float);
    }

    #[rstest]
    #[case(json!("12"), true, true)]
    #[case(json!("-1.5"), true, false)]
    #[case(json!(3), true, true)]
    #[case(json!("x1"), false, false)]
    #[case(json!(null), false, false)]
    fn loose_values(#[case] input: Value, #[case] numeric: bool, #[case] int: bool) {
        assert_eq!(NumericVal.is_valid(&input), numeric);
        assert_eq!(IntVal.is_valid(&input), int);
    }

    #[test]
    fn containers_and_scalars() {
        assert!(ArrayType.is_valid(&json!([])));
        assert!(ObjectType.is_valid(&json!({})));
        assert!(BoolType.is_valid(&json!(false)));
        assert!(StringType.is_valid(&json!("")));
        assert!(ScalarVal.is_valid(&json!(false)));
        assert!(!ScalarVal.is_valid(&json!(null)));
        assert!(!ScalarVal.is_valid(&json!([1])));
    }

    #[test]
    fn mismatch_reports_actual_type() {
        let err = StringType.evaluate(&json!([1])).unwrap_err();
        assert_eq!(err.param("expected"), Some("string"));
        assert_eq!(err.param("actual"), Some("array"));
    }
}
