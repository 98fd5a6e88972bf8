//! Name-keyed predicate registry
//!
//! [`PredicateLibrary`] is the seam the validator talks to: it turns a
//! predicate name plus literal arguments, or a combinator kind plus
//! compiled operands, into a [`BoxPredicate`]. [`PredicateRegistry`] is the
//! default implementation, a table of factory functions with every builtin
//! registered by category.

use crate::args::Args;
use crate::builtins::{presence, string, types, value};
use crate::chain::ChainBuilder;
use crate::combinators::{self, CombinatorKind};
use crate::error::LibraryError;
use crate::foundation::{BoxPredicate, Predicate};
use crate::regex_cache::RegexCache;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Builds a predicate from its arguments.
pub type PredicateFactory = fn(&Args<'_>) -> Result<BoxPredicate, LibraryError>;

/// Source of named predicates and combinators.
pub trait PredicateLibrary: Send + Sync {
    /// Builds the predicate `name` with literal `args`.
    fn predicate(&self, name: &str, args: &[Value]) -> Result<BoxPredicate, LibraryError>;

    /// Builds the combinator `kind` over compiled operands.
    fn combinator(
        &self,
        kind: CombinatorKind,
        operands: Vec<BoxPredicate>,
    ) -> Result<BoxPredicate, LibraryError> {
        combinators::build(kind, operands)
    }

    /// A fresh chain accumulator.
    fn chain(&self) -> ChainBuilder {
        ChainBuilder::new()
    }
}

/// Registry of named predicate factories
pub struct PredicateRegistry {
    factories: HashMap<String, PredicateFactory>,
    regexes: RegexCache,
}

impl PredicateRegistry {
    /// Create a registry with all builtin predicates
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register_presence_predicates();
        registry.register_type_predicates();
        registry.register_string_predicates();
        registry.register_value_predicates();

        registry
    }

    /// Create a registry with no predicates at all
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
            regexes: RegexCache::new(),
        }
    }

    /// Register (or replace) a predicate factory
    pub fn register(&mut self, name: impl Into<String>, factory: PredicateFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Check if a predicate exists
    pub fn has_predicate(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Get all predicate names, sorted
    pub fn predicate_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// The compiled-pattern cache shared by every `regex` predicate
    pub fn regex_cache(&self) -> &RegexCache {
        &self.regexes
    }

    // Registration methods for each category

    fn register_presence_predicates(&mut self) {
        self.register("notOptional", nullary::<presence::NotOptional>);
        self.register("notEmpty", nullary::<presence::NotEmpty>);
        self.register("nullType", nullary::<presence::NullType>);
        self.register("alwaysValid", nullary::<presence::AlwaysValid>);
        self.register("alwaysInvalid", nullary::<presence::AlwaysInvalid>);
    }

    fn register_type_predicates(&mut self) {
        self.register("stringType", nullary::<types::StringType>);
        self.register("intType", nullary::<types::IntType>);
        self.register("floatType", nullary::<types::FloatType>);
        self.register("numericVal", nullary::<types::NumericVal>);
        self.register("intVal", nullary::<types::IntVal>);
        self.register("boolType", nullary::<types::BoolType>);
        self.register("arrayType", nullary::<types::ArrayType>);
        self.register("objectType", nullary::<types::ObjectType>);
        self.register("scalarVal", nullary::<types::ScalarVal>);
    }

    fn register_string_predicates(&mut self) {
        self.register("email", nullary::<string::Email>);
        self.register("url", nullary::<string::Url>);
        self.register("hexRgbColor", nullary::<string::HexRgbColor>);
        self.register("alnum", string::alnum);
        self.register("alpha", string::alpha);
        self.register("digit", string::digit);
        self.register("lowercase", nullary::<string::Lowercase>);
        self.register("uppercase", nullary::<string::Uppercase>);
        self.register("regex", string::regex);
        self.register("length", string::length);
        self.register("startsWith", string::starts_with);
        self.register("endsWith", string::ends_with);
        self.register("contains", string::contains);
    }

    fn register_value_predicates(&mut self) {
        self.register("equals", value::equals);
        self.register("in", value::in_haystack);
        self.register("min", value::min);
        self.register("max", value::max);
        self.register("between", value::between);
        self.register("positive", nullary::<value::Positive>);
        self.register("negative", nullary::<value::Negative>);
    }
}

impl PredicateLibrary for PredicateRegistry {
    fn predicate(&self, name: &str, args: &[Value]) -> Result<BoxPredicate, LibraryError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| LibraryError::unknown(name))?;

        factory(&Args::new(name, args, &self.regexes))
    }
}

impl Default for PredicateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("predicates", &self.factories.len())
            .field("cached_patterns", &self.regexes.len())
            .finish()
    }
}

/// Factory for predicates that take no arguments
pub fn nullary<P>(args: &Args<'_>) -> Result<BoxPredicate, LibraryError>
where
    P: Predicate + Default + 'static,
{
    args.expect_count(0..=0)?;
    Ok(Box::new(P::default()))
}
