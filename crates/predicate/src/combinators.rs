//! Logical combinators over independently compiled predicates
//!
//! A combinator takes already-built operand predicates, evaluates each one
//! against the same value and combines the outcomes:
//!
//! | name | passes when | no operands |
//! |---|---|---|
//! | `allOf` | every operand passes | passes |
//! | `anyOf` | at least one operand passes | fails |
//! | `noneOf` | no operand passes | passes |
//! | `oneOf` | exactly one operand passes | fails |
//! | `not` | its single operand fails | n/a (arity error) |
//!
//! # Examples
//!
//! ```
//! use treecheck_predicate::combinators::{AnyOf, CombinatorKind, build};
//! use treecheck_predicate::builtins::types::{IntType, StringType};
//! use treecheck_predicate::{Predicate, PredicateExt};
//! use serde_json::json;
//!
//! let either = AnyOf::new(vec![StringType.boxed(), IntType.boxed()]);
//! assert!(either.is_valid(&json!(3)));
//! assert!(!either.is_valid(&json!(true)));
//!
//! let not = build(CombinatorKind::Not, vec![StringType.boxed()]).unwrap();
//! assert!(not.is_valid(&json!(3)));
//! ```

use crate::error::{LibraryError, ValidationError};
use crate::foundation::{BoxPredicate, Predicate};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// COMBINATOR KIND
// ============================================================================

/// The boolean operators a schema can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinatorKind {
    AllOf,
    AnyOf,
    NoneOf,
    OneOf,
    Not,
}

impl CombinatorKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 5] = [Self::AllOf, Self::AnyOf, Self::NoneOf, Self::OneOf, Self::Not];

    /// Looks up a kind by its schema keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "allOf" => Some(Self::AllOf),
            "anyOf" => Some(Self::AnyOf),
            "noneOf" => Some(Self::NoneOf),
            "oneOf" => Some(Self::OneOf),
            "not" => Some(Self::Not),
            _ => None,
        }
    }

    /// The schema keyword.
    pub fn name(self) -> &'static str {
        match self {
            Self::AllOf => "allOf",
            Self::AnyOf => "anyOf",
            Self::NoneOf => "noneOf",
            Self::OneOf => "oneOf",
            Self::Not => "not",
        }
    }
}

impl fmt::Display for CombinatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CombinatorKind {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| LibraryError::unknown(s))
    }
}

/// Builds the combinator `kind` over `operands`.
///
/// `not` takes exactly one operand; the others accept any number.
pub fn build(kind: CombinatorKind, mut operands: Vec<BoxPredicate>) -> Result<BoxPredicate, LibraryError> {
    Ok(match kind {
        CombinatorKind::AllOf => Box::new(AllOf::new(operands)),
        CombinatorKind::AnyOf => Box::new(AnyOf::new(operands)),
        CombinatorKind::NoneOf => Box::new(NoneOf::new(operands)),
        CombinatorKind::OneOf => Box::new(OneOf::new(operands)),
        CombinatorKind::Not => match operands.pop() {
            Some(inner) if operands.is_empty() => Box::new(Not::new(inner)),
            popped => {
                return Err(LibraryError::Arity {
                    name: kind.name().to_owned(),
                    expected: "1".to_owned(),
                    actual: operands.len() + usize::from(popped.is_some()),
                });
            }
        },
    })
}

// ============================================================================
// ALL OF
// ============================================================================

/// Every operand must pass. Stops at the first failure.
#[derive(Debug, Default)]
pub struct AllOf {
    operands: Vec<BoxPredicate>,
}

impl AllOf {
    pub fn new(operands: Vec<BoxPredicate>) -> Self {
        Self { operands }
    }

    pub fn operands(&self) -> &[BoxPredicate] {
        &self.operands
    }
}

impl Predicate for AllOf {
    fn evaluate(&self, input: &Value) -> Result<(), ValidationError> {
        for operand in &self.operands {
            operand.evaluate(input)?;
        }
        Ok(())
    }
}

// ============================================================================
// ANY OF
// ============================================================================

/// At least one operand must pass. Stops at the first success.
#[derive(Debug, Default)]
pub struct AnyOf {
    operands: Vec<BoxPredicate>,
}

impl AnyOf {
    pub fn new(operands: Vec<BoxPredicate>) -> Self {
        Self { operands }
    }

    pub fn operands(&self) -> &[BoxPredicate] {
        &self.operands
    }
}

impl Predicate for AnyOf {
    fn evaluate(&self, input: &Value) -> Result<(), ValidationError> {
        let mut errors = Vec::with_capacity(self.operands.len());
        for operand in &self.operands {
            match operand.evaluate(input) {
                Ok(()) => return Ok(()),
                Err(e) => errors.push(e),
            }
        }
        Err(ValidationError::new("any_of", "No alternative passed").with_nested(errors))
    }
}

// ============================================================================
// NONE OF
// ============================================================================

/// No operand may pass.
#[derive(Debug, Default)]
pub struct NoneOf {
    operands: Vec<BoxPredicate>,
}

impl NoneOf {
    pub fn new(operands: Vec<BoxPredicate>) -> Self {
        Self { operands }
    }
}

impl Predicate for NoneOf {
    fn evaluate(&self, input: &Value) -> Result<(), ValidationError> {
        match self.operands.iter().position(|o| o.is_valid(input)) {
            None => Ok(()),
            Some(index) => Err(ValidationError::new("none_of", "An excluded alternative passed")
                .with_param("index", index.to_string())),
        }
    }
}

// ============================================================================
// ONE OF
// ============================================================================

/// Exactly one operand must pass.
#[derive(Debug, Default)]
pub struct OneOf {
    operands: Vec<BoxPredicate>,
}

impl OneOf {
    pub fn new(operands: Vec<BoxPredicate>) -> Self {
        Self { operands }
    }
}

impl Predicate for OneOf {
    fn evaluate(&self, input: &Value) -> Result<(), ValidationError> {
        let passed = self.operands.iter().filter(|o| o.is_valid(input)).count();
        if passed == 1 {
            Ok(())
        } else {
            Err(
                ValidationError::new("one_of", "Exactly one alternative must pass")
                    .with_param("passed", passed.to_string()),
            )
        }
    }
}

// ============================================================================
// NOT
// ============================================================================

/// Inverts a predicate.
#[derive(Debug)]
pub struct Not {
    inner: BoxPredicate,
}

impl Not {
    pub fn new(inner: BoxPredicate) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &dyn Predicate {
        self.inner.as_ref()
    }
}

impl Predicate for Not {
    fn evaluate(&self, input: &Value) -> Result<(), ValidationError> {
        match self.inner.evaluate(input) {
            Ok(()) => Err(ValidationError::new(
                "not",
                "Validation should have failed but passed",
            )),
            Err(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::PredicateExt;
    use crate::predicate;
    use rstest::rstest;
    use serde_json::json;

    predicate! {
        Pass;
        rule(input) { true }
        error(input) { ValidationError::custom("unreachable") }
    }

    predicate! {
        Fail;
        rule(input) { false }
        error(input) { ValidationError::custom("fail") }
    }

    fn operands(pattern: &[bool]) -> Vec<BoxPredicate> {
        pattern
            .iter()
            .map(|&pass| if pass { Pass.boxed() } else { Fail.boxed() })
            .collect()
    }

    #[rstest]
    #[case(CombinatorKind::AllOf, &[], true)]
    #[case(CombinatorKind::AllOf, &[true, true], true)]
    #[case(CombinatorKind::AllOf, &[true, false], false)]
    #[case(CombinatorKind::AnyOf, &[], false)]
    #[case(CombinatorKind::AnyOf, &[false, true], true)]
    #[case(CombinatorKind::AnyOf, &[false, false], false)]
    #[case(CombinatorKind::NoneOf, &[], true)]
    #[case(CombinatorKind::NoneOf, &[false, false], true)]
    #[case(CombinatorKind::NoneOf, &[false, true], false)]
    #[case(CombinatorKind::OneOf, &[], false)]
    #[case(CombinatorKind::OneOf, &[false, true], true)]
    #[case(CombinatorKind::OneOf, &[true, true], false)]
    #[case(CombinatorKind::Not, &[true], false)]
    #[case(CombinatorKind::Not, &[false], true)]
    fn truth_table(#[case] kind: CombinatorKind, #[case] pattern: &[bool], #[case] expected: bool) {
        let predicate = build(kind, operands(pattern)).unwrap();
        assert_eq!(predicate.is_valid(&json!("x")), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    fn not_rejects_wrong_arity(#[case] count: usize) {
        let err = build(CombinatorKind::Not, operands(&vec![true; count])).unwrap_err();
        assert!(matches!(err, LibraryError::Arity { actual, .. } if actual == count));
    }

    #[test]
    fn any_of_collects_nested_failures() {
        let err = AnyOf::new(operands(&[false, false])).evaluate(&json!(1)).unwrap_err();
        assert_eq!(err.nested.len(), 2);
    }

    #[test]
    fn one_of_reports_pass_count() {
        let err = OneOf::new(operands(&[true, true, false])).evaluate(&json!(1)).unwrap_err();
        assert_eq!(err.param("passed"), Some("2"));
    }

    #[test]
    fn keyword_round_trip() {
        for kind in CombinatorKind::ALL {
            assert_eq!(CombinatorKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.name().parse::<CombinatorKind>().unwrap(), kind);
        }
        assert_eq!(CombinatorKind::from_name("nullable"), None);
    }
}
