//! The result of one validation run

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use std::fmt;

/// Insertion-ordered mapping from error key to message.
///
/// Once a key is recorded it is never overwritten: the first failure for a
/// key is the one reported.
///
/// ```
/// use treecheck_validator::ErrorMap;
///
/// let mut errors = ErrorMap::new();
/// assert!(errors.record("name", "Name is mandatory"));
/// assert!(!errors.record("name", "Name contains invalid characters"));
/// assert_eq!(errors.get("name"), Some("Name is mandatory"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    entries: IndexMap<String, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` under `key` unless the key already failed.
    /// Returns whether the message was stored.
    pub fn record(&mut self, key: impl Into<String>, message: impl Into<String>) -> bool {
        match self.entries.entry(key.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(message.into());
                true
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.entries
    }
}

impl IntoIterator for ErrorMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Ordered comparison, convenient in tests.
impl<const N: usize> PartialEq<[(&str, &str); N]> for ErrorMap {
    fn eq(&self, other: &[(&str, &str); N]) -> bool {
        self.len() == N && self.iter().zip(other.iter()).all(|(a, b)| a == *b)
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, message)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{key}: {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_write_wins_and_order_is_kept() {
        let mut errors = ErrorMap::new();
        errors.record("color", "bad color");
        errors.record("lang.de.name", "bad name");
        errors.record("color", "other");
        assert_eq!(errors, [("color", "bad color"), ("lang.de.name", "bad name")]);
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["color", "lang.de.name"]);
        assert!(errors != [("lang.de.name", "bad name"), ("color", "bad color")]);
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut errors = ErrorMap::new();
        errors.record("person_email", "invalid email");
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"person_email":"invalid email"}"#
        );
    }

    #[test]
    fn display_lists_entries() {
        let mut errors = ErrorMap::new();
        errors.record("a", "x");
        errors.record("b", "y");
        assert_eq!(errors.to_string(), "a: x\nb: y");
        assert!(ErrorMap::new().is_empty());
    }
}
