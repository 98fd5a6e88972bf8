//! Parsed, reusable schemas

use crate::error::{SchemaError, SchemaResult};
use crate::rule::Rule;
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;
use treecheck_predicate::value_utils::value_type_name;

/// An ordered list of [`Rule`]s.
///
/// Parsing is all or nothing: one malformed entry rejects the schema.
///
/// ```
/// use treecheck_validator::Schema;
///
/// let schema = Schema::from_json_str(r#"[
///     {"field": "name", "rule": "notOptional", "message": "Name is mandatory"},
///     {"field": "email", "rule": "email", "message": "E-Mail is invalid"}
/// ]"#).unwrap();
/// assert_eq!(schema.len(), 2);
///
/// let err = Schema::from_json_str(r#"[{"field": "name", "message": "x"}]"#).unwrap_err();
/// assert_eq!(err.to_string(), "invalid rule definition.");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    rules: Vec<Rule>,
}

impl Schema {
    /// Parses a JSON array of rule definitions.
    pub fn parse(raw: &Value) -> SchemaResult<Self> {
        let entries = raw.as_array().ok_or_else(|| SchemaError::NotASequence {
            found: value_type_name(raw),
        })?;

        let rules = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Rule::parse_at(entry, Some(index)))
            .collect::<SchemaResult<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Parses schema text.
    pub fn from_json_str(text: &str) -> SchemaResult<Self> {
        let raw: Value = serde_json::from_str(text)?;
        Self::parse(&raw)
    }

    pub fn from_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Appends a rule.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<Rule> for Schema {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::from_rules(iter)
    }
}

impl<'de> Deserialize<'de> for Schema {
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
    use serde_json::json;

    #[test]
    fn rejects_non_arrays() {
        let err = Schema::parse(&json!({"field": "name"})).unwrap_err();
        assert!(matches!(err, SchemaError::NotASequence { found: "object" }));
    }

    #[test]
    fn malformed_entry_reports_its_index() {
        let err = Schema::parse(&json!([
            {"field": "name", "rule": "notOptional", "message": "m"},
            {"field": "name", "message": "m"},
        ]))
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefinition { index: Some(1) }));
    }

    #[test]
    fn bad_json_text() {
        assert!(matches!(Schema::from_json_str("[{"), Err(SchemaError::Json(_))));
    }

    #[test]
    fn built_from_rules() {
        let mut schema: Schema = vec![Rule::new("name", "notOptional", "m")].into_iter().collect();
        schema.push(Rule::new("email", "email", "e"));
        assert_eq!(schema.len(), 2);
        assert_eq!(
            schema.iter().map(Rule::message).collect::<Vec<_>>(),
            vec!["m", "e"]
        );
        assert!(Schema::default().is_empty());
    }

    #[test]
    fn deserializes_from_config_files() {
        let schema: Schema =
            serde_json::from_value(json!([{"field": "a", "rule": "intType", "message": "m"}])).unwrap();
        assert_eq!(schema.rules()[0].field(), &["a"]);
    }
}
