//! Core traits for the predicate system
//!
//! Every named predicate, combinator and chain evaluates a single
//! `serde_json::Value` and reports success or a structured
//! [`ValidationError`]. Predicates must be pure: the same input always
//! yields the same outcome.

use crate::chain::{Guarded, Modifier};
use crate::combinators::{AllOf, AnyOf, Not};
use crate::error::ValidationError;
use serde_json::Value;
use std::fmt;

// ============================================================================
// CORE PREDICATE TRAIT
// ============================================================================

/// A unary check over one tree value.
///
/// # Examples
///
/// ```
/// use treecheck_predicate::{Predicate, ValidationError};
/// use serde_json::{Value, json};
///
/// #[derive(Debug)]
/// struct IsTrue;
///
/// impl Predicate for IsTrue {
///     fn evaluate(&self, input: &Value) -> Result<(), ValidationError> {
///         if input == &Value::Bool(true) {
///             Ok(())
///         } else {
///             Err(ValidationError::new("is_true", "Value must be true"))
///         }
///     }
/// }
///
/// assert!(IsTrue.is_valid(&json!(true)));
/// assert!(!IsTrue.is_valid(&json!("true")));
/// ```
pub trait Predicate: Send + Sync + fmt::Debug {
    /// Checks the input value.
    ///
    /// A missing value is presented as `null`.
    fn evaluate(&self, input: &Value) -> Result<(), ValidationError>;

    /// Boolean form of [`evaluate`](Predicate::evaluate).
    #[inline]
    fn is_valid(&self, input: &Value) -> bool {
        self.evaluate(input).is_ok()
    }
}

/// An owned, type-erased predicate: what the library hands out.
pub type BoxPredicate = Box<dyn Predicate>;

impl<P: Predicate + ?Sized> Predicate for Box<P> {
    #[inline]
    fn evaluate(&self, input: &Value) -> Result<(), ValidationError> {
        (**self).evaluate(input)
    }
}

// ============================================================================
// EXTENSION TRAIT
// ============================================================================

/// Fluent composition for concrete predicates.
///
/// # Examples
///
/// ```
/// use treecheck_predicate::prelude::*;
/// use treecheck_predicate::builtins::string::{Email, Length};
/// use serde_json::json;
///
/// let check = Email.and(Length::new(Some(6), None)).nullable();
/// assert!(check.is_valid(&json!(null)));
/// assert!(check.is_valid(&json!("jo@e.io")));
/// assert!(!check.is_valid(&json!("j@e.i")));
/// ```
pub trait PredicateExt: Predicate + Sized + 'static {
    /// Erases the concrete type.
    fn boxed(self) -> BoxPredicate {
        Box::new(self)
    }

    /// Both must pass.
    fn and<P: Predicate + 'static>(self, other: P) -> AllOf {
        AllOf::new(vec![self.boxed(), other.boxed()])
    }

    /// At least one must pass.
    fn or<P: Predicate + 'static>(self, other: P) -> AnyOf {
        AnyOf::new(vec![self.boxed(), other.boxed()])
    }

    /// Inverts the outcome.
    fn not(self) -> Not {
        Not::new(self.boxed())
    }

    /// Lets `null` pass without running `self`.
    fn nullable(self) -> Guarded {
        Guarded::new(Modifier::Nullable, self.boxed())
    }

    /// Lets `null` and `""` pass without running `self`.
    fn optional(self) -> Guarded {
        Guarded::new(Modifier::Optional, self.boxed())
    }
}

impl<T: Predicate + 'static> PredicateExt for T {}
