//! The validation loop
//!
//! Rules run in schema order against one read-only tree. Each failure is
//! recorded under its error key and later rules never overwrite it:
//!
//! - a concrete rule is skipped outright when its key already failed, so
//!   its predicate is never evaluated;
//! - a wildcard rule is expanded against the tree's leaves and evaluated
//!   once per matched leaf, skipping leaves whose concrete path already
//!   failed. Wildcard failures are keyed by the concrete path.
//!
//! A missing field is evaluated as `null`.

use crate::compile::RuleCompiler;
use crate::config::ValidatorConfig;
use crate::error::{SchemaError, SchemaResult};
use crate::error_map::ErrorMap;
use crate::matcher;
use crate::rule::Rule;
use crate::schema::Schema;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};
use treecheck_predicate::{BoxPredicate, LibraryError, Predicate, PredicateLibrary, PredicateRegistry};
use treecheck_tree::{FieldPath, TreeSource};

/// Stand-in for fields the tree does not contain.
static MISSING: Value = Value::Null;

/// Validates trees against schemas.
///
/// Holds no per-call state; one validator can serve many threads.
///
/// ```
/// use treecheck_validator::MapValidator;
/// use serde_json::json;
///
/// let data = json!({"name": "John Doe", "email": "john.doe@example.com"});
/// let schema = json!([
///     {"field": "name", "rule": "notOptional", "message": "Name is mandatory"},
///     {"field": "name", "rule": ["length", 2, 40], "message": "Name is too long"},
///     {"field": "age", "rule": ["nullable", "intVal"], "message": "Age must be a number"},
///     {"field": "email", "rule": "email", "message": "E-Mail is invalid"},
/// ]);
///
/// let errors = MapValidator::new().validate(&data, &schema).unwrap();
/// assert!(errors.is_empty());
/// ```
#[derive(Clone)]
pub struct MapValidator {
    library: Arc<dyn PredicateLibrary>,
    config: ValidatorConfig,
}

impl MapValidator {
    /// A validator over the builtin [`PredicateRegistry`].
    pub fn new() -> Self {
        Self::with_library(Arc::new(PredicateRegistry::new()))
    }

    /// A validator over a custom predicate library.
    pub fn with_library(library: Arc<dyn PredicateLibrary>) -> Self {
        Self {
            library,
            config: ValidatorConfig::default(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn library(&self) -> &dyn PredicateLibrary {
        self.library.as_ref()
    }

    /// Validates `data` against a raw schema.
    ///
    /// The whole schema is parsed before any rule runs, so a malformed
    /// entry fails the call without a partial result.
    pub fn validate<S>(&self, data: &S, schema: &Value) -> SchemaResult<ErrorMap>
    where
        S: TreeSource + ?Sized,
    {
        let schema = Schema::parse(schema)?;
        self.validate_schema(data, &schema)
    }

    /// Convenience for callers holding both sides as JSON values.
    pub fn validate_json(&self, data: &Value, schema: &Value) -> SchemaResult<ErrorMap> {
        self.validate(data, schema)
    }

    /// Validates `data` against an already parsed schema.
    pub fn validate_schema<S>(&self, data: &S, schema: &Schema) -> SchemaResult<ErrorMap>
    where
        S: TreeSource + ?Sized,
    {
        let compiler = RuleCompiler::new(self.library.as_ref(), self.config.unresolved);
        let mut errors = ErrorMap::new();

        for rule in schema {
            debug!(field = %rule.field(), wildcard = rule.is_wildcard(), "applying rule");
            let outcome = if rule.is_wildcard() {
                self.apply_wildcard(&compiler, data, rule, &mut errors)
            } else {
                self.apply_concrete(&compiler, data, rule, &mut errors)
            };
            outcome.map_err(|source| SchemaError::UnresolvedPredicate {
                field: rule.field().to_string(),
                source,
            })?;
        }

        debug!(rules = schema.len(), failures = errors.len(), "validation finished");
        Ok(errors)
    }

    fn apply_concrete<S>(
        &self,
        compiler: &RuleCompiler<'_>,
        data: &S,
        rule: &Rule,
        errors: &mut ErrorMap,
    ) -> Result<(), LibraryError>
    where
        S: TreeSource + ?Sized,
    {
        let key = rule.error_key(&self.config.key_separator);
        if errors.contains_key(&key) {
            trace!(field = %rule.field(), %key, "key already failed, rule skipped");
            return Ok(());
        }

        let value = data.get_in(rule.field()).unwrap_or(&MISSING);
        let predicate = compiler.compile(rule.spec())?;
        if !passes(predicate.as_ref(), rule, rule.field(), value) {
            errors.record(key, rule.message());
        }
        Ok(())
    }

    fn apply_wildcard<S>(
        &self,
        compiler: &RuleCompiler<'_>,
        data: &S,
        rule: &Rule,
        errors: &mut ErrorMap,
    ) -> Result<(), LibraryError>
    where
        S: TreeSource + ?Sized,
    {
        if rule.has_explicit_key() {
            debug!(field = %rule.field(), key = %rule.key(), "key is ignored for wildcard rules");
        }

        // Compiled on the first leaf that needs it.
        let mut compiled: Option<Option<BoxPredicate>> = None;
        let mut failure = None;
        let mut matched = 0_usize;

        matcher::for_each_match(rule.field(), data, |path, value| {
            if failure.is_some() {
                return;
            }
            matched += 1;

            let key = path.join(&self.config.key_separator);
            if errors.contains_key(&key) {
                trace!(%key, "key already failed, leaf skipped");
                return;
            }

            if compiled.is_none() {
                match compiler.compile(rule.spec()) {
                    Ok(predicate) => compiled = Some(predicate),
                    Err(error) => {
                        failure = Some(error);
                        return;
                    }
                }
            }

            let predicate = compiled.as_ref().and_then(Option::as_ref);
            if !passes(predicate, rule, path, value) {
                errors.record(key, rule.message());
            }
        });

        debug!(field = %rule.field(), matched, "wildcard rule expanded");
        failure.map_or(Ok(()), Err)
    }
}

impl Default for MapValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MapValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapValidator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// An empty rule compiles to nothing and never passes.
fn passes(predicate: Option<&BoxPredicate>, rule: &Rule, path: &FieldPath, value: &Value) -> bool {
    let Some(predicate) = predicate else {
        trace!(%path, "empty rule");
        return false;
    };
    match predicate.evaluate(value) {
        Ok(()) => true,
        Err(error) => {
            trace!(%path, rule = %rule.spec(), code = %error.code, "rule failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn missing_field_is_evaluated_as_null() {
        let validator = MapValidator::new();
        let schema = json!([
            {"field": "age", "rule": ["nullable", "intVal"], "message": "bad age"},
            {"field": "name", "rule": "notOptional", "message": "Name is mandatory"},
        ]);
        let errors = validator.validate(&json!({}), &schema).unwrap();
        assert_eq!(errors, [("name", "Name is mandatory")]);
    }

    #[test]
    fn concrete_rule_is_not_compiled_once_key_failed() {
        let validator = MapValidator::new().with_config(ValidatorConfig::strict());
        let schema = json!([
            {"field": "color", "rule": "notOptional", "message": "first"},
            {"field": "color", "rule": "hexColour", "message": "second"},
        ]);
        let errors = validator.validate(&json!({}), &schema).unwrap();
        assert_eq!(errors, [("color", "first")]);
    }

    #[test]
    fn wildcard_without_matches_never_compiles() {
        let validator = MapValidator::new().with_config(ValidatorConfig::strict());
        let schema = json!([{"field": ["lang", "*"], "rule": "hexColour", "message": "m"}]);
        let errors = validator.validate(&json!({"color": "red"}), &schema).unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn strict_mode_names_the_field() {
        let validator = MapValidator::new().with_config(ValidatorConfig::strict());
        let schema = json!([{"field": ["lang", "*"], "rule": "hexColour", "message": "m"}]);
        let err = validator.validate(&json!({"lang": {"de": "x"}}), &schema).unwrap_err();
        assert!(matches!(err, SchemaError::UnresolvedPredicate { ref field, .. } if field == "lang.*"));
    }

    #[test]
    fn debug_omits_library() {
        let rendered = format!("{:?}", MapValidator::default());
        assert!(rendered.starts_with("MapValidator { config: ValidatorConfig"));
    }
}
