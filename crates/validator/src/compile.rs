//! Rule chain builder
//!
//! Turns a [`RuleSpec`] into one predicate using a [`PredicateLibrary`].
//! Combinator operands are compiled independently and handed to the
//! library's combinator. Chain steps are folded into one accumulator, so a
//! `nullable` step guards every step after it.

use crate::config::UnresolvedPolicy;
use crate::rule_spec::RuleSpec;
use serde_json::Value;
use treecheck_predicate::{
    BoxPredicate, ChainBuilder, LibraryError, Modifier, Predicate, PredicateExt, PredicateLibrary,
    ValidationError,
};

/// A predicate that could not be built; it fails every value.
#[derive(Debug, Clone)]
pub struct Unresolved {
    name: String,
    reason: String,
}

impl Unresolved {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl Predicate for Unresolved {
    fn evaluate(&self, _input: &Value) -> Result<(), ValidationError> {
        Err(ValidationError::new("unresolved", "Rule could not be built")
            .with_param("name", self.name.clone())
            .with_param("reason", self.reason.clone()))
    }
}

/// Why a spec could not be turned into a predicate.
enum Unbuilt {
    /// An empty rule, at the top or nested.
    Empty,
    Library(LibraryError),
}

impl From<LibraryError> for Unbuilt {
    fn from(error: LibraryError) -> Self {
        Self::Library(error)
    }
}

/// Compiles rule specs against a library.
///
/// A rule is built as a whole: if any operand or step cannot be built, the
/// entire rule is replaced, never just the offending leaf. This keeps an
/// unknown name inside `not` or `noneOf` from turning into a pass.
pub struct RuleCompiler<'a> {
    library: &'a dyn PredicateLibrary,
    policy: UnresolvedPolicy,
}

impl<'a> RuleCompiler<'a> {
    pub fn new(library: &'a dyn PredicateLibrary, policy: UnresolvedPolicy) -> Self {
        Self { library, policy }
    }

    /// Compiles `spec`. `Ok(None)` means the rule is or contains an empty
    /// rule, so no value can pass it; this holds under both policies.
    ///
    /// Under [`UnresolvedPolicy::Fail`] this never returns an error: a rule
    /// the library cannot build becomes one that always fails.
    pub fn compile(&self, spec: &RuleSpec) -> Result<Option<BoxPredicate>, LibraryError> {
        match (self.build(spec), self.policy) {
            (Ok(predicate), _) => Ok(Some(predicate)),
            (Err(Unbuilt::Empty), _) => Ok(None),
            (Err(Unbuilt::Library(error)), UnresolvedPolicy::Reject) => Err(error),
            (Err(Unbuilt::Library(error)), UnresolvedPolicy::Fail) => {
                tracing::warn!(rule = %spec, %error, "rule cannot be built and will always fail");
                Ok(Some(Box::new(Unresolved::new(spec.to_string(), error.to_string()))))
            }
        }
    }

    fn build(&self, spec: &RuleSpec) -> Result<BoxPredicate, Unbuilt> {
        match spec {
            RuleSpec::Named { name, args } => match Modifier::from_name(name) {
                Some(modifier) => self
                    .apply_modifier(self.library.chain(), modifier, args)
                    .map(|chain| chain.build().boxed()),
                None => Ok(self.library.predicate(name, args)?),
            },
            RuleSpec::Combinator { kind, operands } => {
                let compiled = self.operands(operands)?;
                Ok(self.library.combinator(*kind, compiled)?)
            }
            RuleSpec::Chain(steps) => {
                if steps.is_empty() {
                    return Err(Unbuilt::Empty);
                }
                let mut builder = self.library.chain();
                for step in steps {
                    builder = self.fold(builder, step)?;
                }
                Ok(builder.build().boxed())
            }
        }
    }

    /// One left-fold step: `accumulator = step(accumulator)`.
    fn fold(&self, builder: ChainBuilder, step: &RuleSpec) -> Result<ChainBuilder, Unbuilt> {
        match step {
            RuleSpec::Named { name, args } => match Modifier::from_name(name) {
                Some(modifier) => self.apply_modifier(builder, modifier, args),
                None => Ok(builder.push(self.build(step)?)),
            },
            _ => Ok(builder.push(self.build(step)?)),
        }
    }

    fn apply_modifier(
        &self,
        builder: ChainBuilder,
        modifier: Modifier,
        args: &[Value],
    ) -> Result<ChainBuilder, Unbuilt> {
        let operands = args.iter().map(RuleSpec::from_value).collect::<Vec<_>>();
        Ok(builder.modify(modifier, self.operands(&operands)?))
    }

    fn operands(&self, specs: &[RuleSpec]) -> Result<Vec<BoxPredicate>, Unbuilt> {
        specs.iter().map(|spec| self.build(spec)).collect()
    }
}
