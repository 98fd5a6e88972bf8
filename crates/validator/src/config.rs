//! Validator configuration

use serde::{Deserialize, Serialize};

/// What happens when a rule names a predicate the library cannot build.
///
/// The policy applies to the whole rule: one unknown name or bad argument
/// anywhere in it, however deeply nested, decides the outcome. An empty
/// rule (`[]`), at the top or nested, is not covered by the policy; it
/// never passes under either setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// The rule degrades to a predicate that always fails, so the field
    /// reports the rule's message.
    #[default]
    Fail,
    /// The whole call fails with
    /// [`SchemaError::UnresolvedPredicate`](crate::SchemaError::UnresolvedPredicate).
    Reject,
}

/// Settings for a [`MapValidator`](crate::MapValidator).
///
/// ```
/// use treecheck_validator::{UnresolvedPolicy, ValidatorConfig};
///
/// let config = ValidatorConfig::default()
///     .with_unresolved(UnresolvedPolicy::Reject)
///     .with_key_separator("/");
/// assert_eq!(config.key_separator, "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub unresolved: UnresolvedPolicy,
    /// Joins path segments into error keys.
    pub key_separator: String,
}

impl ValidatorConfig {
    #[must_use = "builder methods must be chained or built"]
    pub fn with_unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved = policy;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_key_separator(mut self, separator: impl Into<String>) -> Self {
        self.key_separator = separator.into();
        self
    }

    /// Strict preset: unknown predicates reject the schema.
    pub fn strict() -> Self {
        Self::default().with_unresolved(UnresolvedPolicy::Reject)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            unresolved: UnresolvedPolicy::Fail,
            key_separator: ".".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.unresolved, UnresolvedPolicy::Fail);
        assert_eq!(config.key_separator, ".");
        assert_eq!(ValidatorConfig::strict().unresolved, UnresolvedPolicy::Reject);
    }

    #[test]
    fn partial_deserialization_fills_defaults() {
        let config: ValidatorConfig = serde_json::from_value(json!({"unresolved": "reject"})).unwrap();
        assert_eq!(config.unresolved, UnresolvedPolicy::Reject);
        assert_eq!(config.key_separator, ".");
    }

    #[test]
    fn serializes_snake_case() {
        let value = serde_json::to_value(ValidatorConfig::default()).unwrap();
        assert_eq!(value, json!({"unresolved": "fail", "key_separator": "."}));
    }
}
