//! Chain modifiers and the fluent chain accumulator
//!
//! A chain is a left fold over steps. Plain predicates are appended to the
//! current scope; a modifier such as `nullable` opens a new scope whose
//! steps (the modifier's own operands plus everything folded after it) are
//! skipped when the modifier admits the value.
//!
//! ```
//! use treecheck_predicate::chain::{ChainBuilder, Modifier};
//! use treecheck_predicate::builtins::string::Email;
//! use treecheck_predicate::{Predicate, PredicateExt};
//! use serde_json::json;
//!
//! let chain = ChainBuilder::new()
//!     .modify(Modifier::Optional, Vec::new())
//!     .push(Email.boxed())
//!     .build();
//!
//! assert!(chain.is_valid(&json!("")));
//! assert!(chain.is_valid(&json!(null)));
//! assert!(!chain.is_valid(&json!("not-an-email")));
//! ```

use crate::error::ValidationError;
use crate::foundation::{BoxPredicate, Predicate};
use serde_json::Value;
use std::fmt;

// ============================================================================
// MODIFIER
// ============================================================================

/// A chain step that changes how absent or empty values are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `null` passes without running the guarded steps.
    Nullable,
    /// `null` and `""` pass without running the guarded steps.
    Optional,
}

impl Modifier {
    /// Looks up a modifier by its schema keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "nullable" => Some(Self::Nullable),
            "optional" => Some(Self::Optional),
            _ => None,
        }
    }

    /// The schema keyword.
    pub fn name(self) -> &'static str {
        match self {
            Self::Nullable => "nullable",
            Self::Optional => "optional",
        }
    }

    /// Whether `input` short-circuits to a pass.
    #[inline]
    pub fn admits(self, input: &Value) -> bool {
        match self {
            Self::Nullable => input.is_null(),
            Self::Optional => match input {
                Value::Null => true,
                Value::String(s) => s.is_empty(),
                _ => false,
            },
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// GUARDED
// ============================================================================

/// A single predicate behind a modifier.
#[derive(Debug)]
pub struct Guarded {
    modifier: Modifier,
    inner: BoxPredicate,
}

impl Guarded {
    pub fn new(modifier: Modifier, inner: BoxPredicate) -> Self {
        Self { modifier, inner }
    }

    pub fn modifier(&self) -> Modifier {
        self.modifier
    }
}

impl Predicate for Guarded {
    fn evaluate(&self, input: &Value) -> Result<(), ValidationError> {
        if self.modifier.admits(input) {
            return Ok(());
        }
        self.inner.evaluate(input)
    }
}

// ============================================================================
// CHAIN BUILDER
// ============================================================================

#[derive(Debug, Default)]
struct Scope {
    modifier: Option<Modifier>,
    steps: Vec<BoxPredicate>,
}

/// Accumulator threaded through the steps of a chain.
///
/// Every method consumes the builder and returns the next state, so a
/// chain reads as `builder = step(builder)`.
#[derive(Debug)]
pub struct ChainBuilder {
    // Never empty: index 0 is the unguarded root scope.
    scopes: Vec<Scope>,
}

impl ChainBuilder {
    /// A neutral builder. Built as is, it passes every value.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// Appends a predicate that must pass.
    #[must_use = "builder methods must be chained or built"]
    pub fn push(mut self, predicate: BoxPredicate) -> Self {
        self.current().steps.push(predicate);
        self
    }

    /// Opens a scope guarded by `modifier`.
    ///
    /// `operands` become the first steps of the new scope.
    #[must_use = "builder methods must be chained or built"]
    pub fn modify(mut self, modifier: Modifier, operands: Vec<BoxPredicate>) -> Self {
        self.scopes.push(Scope {
            modifier: Some(modifier),
            steps: operands,
        });
        self
    }

    /// Number of predicate steps folded so far, across all scopes.
    pub fn step_count(&self) -> usize {
        self.scopes.iter().map(|s| s.steps.len()).sum()
    }

    /// True when no step and no modifier has been folded in.
    pub fn is_empty(&self) -> bool {
        self.scopes.len() == 1 && self.step_count() == 0
    }

    /// Collapses the scopes, innermost first, into one predicate.
    pub fn build(self) -> ChainPredicate {
        let mut inner: Option<ChainPredicate> = None;
        for scope in self.scopes.into_iter().rev() {
            let mut steps = scope.steps;
            if let Some(nested) = inner.take() {
                steps.push(Box::new(nested));
            }
            inner = Some(ChainPredicate {
                modifier: scope.modifier,
                steps,
            });
        }
        inner.unwrap_or_default()
    }

    fn current(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The predicate a [`ChainBuilder`] produces.
#[derive(Debug, Default)]
pub struct ChainPredicate {
    modifier: Option<Modifier>,
    steps: Vec<BoxPredicate>,
}

impl ChainPredicate {
    pub fn modifier(&self) -> Option<Modifier> {
        self.modifier
    }

    pub fn steps(&self) -> &[BoxPredicate] {
        &self.steps
    }
}

impl Predicate for ChainPredicate {
    fn evaluate(&self, input: &Value) -> Result<(), ValidationError> {
        if self.modifier.is_some_and(|m| m.admits(input)) {
            return Ok(());
        }
        for step in &self.steps {
            step.evaluate(input)?;
        }
        Ok(())
    }
}
