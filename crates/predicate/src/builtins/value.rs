//! Value comparison predicates
//!
//! Numeric predicates accept numbers and numeric strings, so `"18"` passes
//! `min(18)`.

use crate::ValidationError;
use crate::args::Args;
use crate::error::LibraryError;
use crate::foundation::BoxPredicate;
use crate::value_utils::{as_numeric, number_as_f64, scalar_text};
use serde_json::Value;

/// Equality that treats `1` and `1.0` as the same number.
fn same_value(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => number_as_f64(l) == number_as_f64(r),
        _ => left == right,
    }
}

// ============================================================================
// EQUALS / IN
// ============================================================================

crate::predicate! {
    #[derive(PartialEq)]
    pub Equals { expected: Value };
    rule(self, input) { same_value(input, &self.expected) }
    error(self, input) {
        ValidationError::new("equals", "Value does not equal the expected value")
            .with_param("expected", self.expected.to_string())
    }
}

/// `equals(value)`
pub fn equals(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    args.expect_count(1..=1)?;
    Ok(Box::new(Equals::new(args.value(0)?.clone())))
}

crate::predicate! {
    /// Membership in an array, or substring of a string haystack.
    ///
    /// Non-strict comparison matches scalars by their text, so `"1"` is in
    /// `[1, 2]`.
    pub InHaystack { haystack: Value, strict: bool };
    rule(self, input) {
        match &self.haystack {
            Value::Array(items) => items.iter().any(|item| {
                same_value(item, input)
                    || (!self.strict
                        && scalar_text(item).is_some_and(|t| scalar_text(input).as_ref() == Some(&t)))
            }),
            Value::String(text) => match input {
                Value::String(s) => text.contains(s.as_str()),
                other if !self.strict => scalar_text(other).is_some_and(|t| text.contains(t.as_str())),
                _ => false,
            },
            _ => false,
        }
    }
    error(self, input) {
        ValidationError::new("in", "Value is not among the accepted values")
            .with_param("haystack", self.haystack.to_string())
    }
}

/// `in(haystack, strict = false)`; the haystack is an array or a string
pub fn in_haystack(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    args.expect_count(1..=2)?;
    let haystack = args.value(0)?;
    if !(haystack.is_array() || haystack.is_string()) {
        return Err(LibraryError::invalid_argument(
            args.name(),
            0,
            "haystack must be an array or a string",
        ));
    }
    let strict = args.opt_bool(1, false)?;
    Ok(Box::new(InHaystack::new(haystack.clone(), strict)))
}

// ============================================================================
// RANGES
// ============================================================================

crate::predicate! {
    /// Numeric value within bounds. `None` leaves a side open.
    #[derive(Copy, PartialEq)]
    pub Range { min: Option<f64>, max: Option<f64>, inclusive: bool };
    rule(self, input) { as_numeric(input).is_some_and(|n| self.admits(n)) }
    error(self, input) {
        let describe = |bound: Option<f64>| bound.map_or_else(|| "-".to_owned(), |b| b.to_string());
        let actual = as_numeric(input).map_or_else(|| input.to_string(), |n| n.to_string());
        ValidationError::out_of_range(describe(self.min), describe(self.max), actual)
    }
    new(min: Option<f64>, max: Option<f64>) { Self { min, max, inclusive: true } }
}

impl Range {
    #[must_use]
    pub fn exclusive(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            inclusive: false,
        }
    }

    fn admits(&self, n: f64) -> bool {
        let above = self
            .min
            .is_none_or(|min| if self.inclusive { n >= min } else { n > min });
        let below = self
            .max
            .is_none_or(|max| if self.inclusive { n <= max } else { n < max });
        above && below
    }
}

fn range(min: Option<f64>, max: Option<f64>, inclusive: bool) -> BoxPredicate {
    Box::new(if inclusive {
        Range::new(min, max)
    } else {
        Range::exclusive(min, max)
    })
}

/// `min(bound, inclusive = true)`
pub fn min(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    args.expect_count(1..=2)?;
    let bound = args.number(0)?;
    Ok(range(Some(bound), None, args.opt_bool(1, true)?))
}

/// `max(bound, inclusive = true)`
pub fn max(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    args.expect_count(1..=2)?;
    let bound = args.number(0)?;
    Ok(range(None, Some(bound), args.opt_bool(1, true)?))
}

/// `between(min, max, inclusive = true)`
pub fn between(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    args.expect_count(2..=3)?;
    let (lo, hi) = (args.number(0)?, args.number(1)?);
    if lo > hi {
        return Err(LibraryError::invalid_argument(
            args.name(),
            1,
            format!("maximum {hi} is below minimum {lo}"),
        ));
    }
    Ok(range(Some(lo), Some(hi), args.opt_bool(2, true)?))
}

crate::predicate! {
    pub Positive;
    rule(input) { as_numeric(input).is_some_and(|n| n > 0.0) }
    error(input) { ValidationError::new("positive", "Value must be positive") }
}

crate::predicate! {
    pub Negative;
    rule(input) { as_numeric(input).is_some_and(|n| n < 0.0) }
    error(input) { ValidationError::new("negative", "Value must be negative") }
}
