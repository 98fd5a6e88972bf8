//! One parsed schema entry

use crate::error::{SchemaError, SchemaResult};
use crate::rule_spec::RuleSpec;
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;
use treecheck_tree::FieldPath;

/// A rule definition: which field, which predicate logic, which message,
/// and under which key a failure is reported.
///
/// # Examples
///
/// ```
/// use treecheck_validator::Rule;
/// use serde_json::json;
///
/// let rule = Rule::parse(&json!({
///     "field": ["person", "email"],
///     "key": "person_email",
///     "rule": ["nullable", "email"],
///     "message": "invalid email",
/// }))
/// .unwrap();
///
/// assert_eq!(rule.field(), &["person", "email"]);
/// assert_eq!(rule.error_key("."), "person_email");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    field: FieldPath,
    spec: RuleSpec,
    message: String,
    key: FieldPath,
}

impl Rule {
    /// Builds a rule whose error key is its field.
    pub fn new(field: impl Into<FieldPath>, spec: impl Into<RuleSpec>, message: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            key: field.clone(),
            field,
            spec: spec.into(),
            message: message.into(),
        }
    }

    /// Reports failures under `key` instead of the field path.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_key(mut self, key: impl Into<FieldPath>) -> Self {
        self.key = key.into();
        self
    }

    /// Parses a raw schema entry.
    ///
    /// `field`, `rule` and `message` are required; `null` counts as
    /// missing. `key` defaults to `field`.
    pub fn parse(raw: &Value) -> SchemaResult<Self> {
        Self::parse_at(raw, None)
    }

    pub(crate) fn parse_at(raw: &Value, index: Option<usize>) -> SchemaResult<Self> {
        let invalid = || SchemaError::invalid_definition(index);
        let entry = raw.as_object().ok_or_else(invalid)?;
        let present = |name: &str| entry.get(name).filter(|v| !v.is_null());

        let (Some(field), Some(spec), Some(message)) =
            (present("field"), present("rule"), present("message"))
        else {
            return Err(invalid());
        };

        let field = path(field).ok_or_else(invalid)?;
        let message = match message {
            Value::String(text) => text.clone(),
            Value::Number(n) => n.to_string(),
            _ => return Err(invalid()),
        };
        let key = match present("key") {
            Some(key) => path(key).ok_or_else(invalid)?,
            None => field.clone(),
        };

        Ok(Self {
            field,
            spec: RuleSpec::from_value(spec),
            message,
            key,
        })
    }

    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn key(&self) -> &FieldPath {
        &self.key
    }

    /// True when `field` contains a wildcard segment.
    pub fn is_wildcard(&self) -> bool {
        self.field.has_wildcard()
    }

    /// Whether an explicit `key` differs from the field.
    pub fn has_explicit_key(&self) -> bool {
        self.key != self.field
    }

    /// The error-map key for non-wildcard rules.
    pub fn error_key(&self, separator: &str) -> String {
        self.key.join(separator)
    }
}

/// A non-empty path from a string, a number or an array of those.
fn path(raw: &Value) -> Option<FieldPath> {
    FieldPath::deserialize(raw).ok().filter(|p| !p.is_empty())
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn scalars_are_promoted() {
        let rule = Rule::parse(&json!({"field": "name", "rule": "email", "message": "m"})).unwrap();
        assert_eq!(rule.field(), &["name"]);
        assert_eq!(rule.key(), rule.field());
        assert_eq!(rule.spec(), &RuleSpec::named("email"));
        assert!(!rule.has_explicit_key());
    }

    #[test]
    fn key_array_joins() {
        let rule = Rule::parse(&json!({
            "field": ["person", "email"],
            "key": ["errors", "person_email"],
            "rule": "email",
            "message": "invalid email",
        }))
        .unwrap();
        assert_eq!(rule.error_key("."), "errors.person_email");
        assert!(rule.has_explicit_key());
    }

    #[test]
    fn wildcard_detection() {
        let rule = Rule::new(FieldPath::from_keys(["lang", "*", "name"]), "alnum", "bad");
        assert!(rule.is_wildcard());
        assert_eq!(rule.error_key("/"), "lang/*/name");
    }

    #[rstest]
    #[case(json!({"field": "name", "message": "m"}))]
    #[case(json!({"rule": "email", "message": "m"}))]
    #[case(json!({"field": "name", "rule": "email"}))]
    #[case(json!({"field": null, "rule": "email", "message": "m"}))]
    #[case(json!({"field": [], "rule": "email", "message": "m"}))]
    #[case(json!({"field": {"a": 1}, "rule": "email", "message": "m"}))]
    #[case(json!({"field": "name", "rule": "email", "message": ["m"]}))]
    #[case(json!("name"))]
    fn malformed_entries(#[case] raw: Value) {
        let err = Rule::parse(&raw).unwrap_err();
        assert_eq!(err.to_string(), "invalid rule definition.");
    }

    #[test]
    fn empty_rule_is_still_a_rule() {
        let rule = Rule::parse(&json!({"field": "name", "rule": [], "message": "m"})).unwrap();
        assert!(rule.spec().is_empty());
    }

    #[test]
    fn deserialize_reports_fixed_message() {
        let err = serde_json::from_str::<Rule>(r#"{"field": "name"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid rule definition."));
        let rule: Rule =
            serde_json::from_str(r#"{"field": ["a", 0], "rule": "intType", "message": "m"}"#).unwrap();
        assert_eq!(rule.field(), &["a", "0"]);
    }
}
