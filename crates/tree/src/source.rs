//! Read-only tree data sources.

use crate::error::TreeError;
use crate::path::{FieldPath, Segment};
use serde_json::Value;

// ============================================================================
// TREE SOURCE TRAIT
// ============================================================================

/// The read operations a validator needs from nested data.
///
/// Implementations must describe a finite, acyclic tree and must walk it in
/// a stable order, since error-key ordering and first-failure-wins both
/// depend on it.
pub trait TreeSource {
    /// Deep lookup. `None` is the missing sentinel: the path does not exist
    /// at some depth, or it contains a wildcard.
    fn get_in(&self, path: &FieldPath) -> Option<&Value>;

    /// Visits every leaf exactly once with its full path from the root.
    ///
    /// Leaves are non-container values (string, number, bool, null). Objects
    /// are visited in key insertion order and arrays by index; empty
    /// containers produce no leaves.
    fn walk(&self, visitor: &mut dyn FnMut(&FieldPath, &Value));
}

impl TreeSource for Value {
    fn get_in(&self, path: &FieldPath) -> Option<&Value> {
        let mut current = self;
        for segment in path {
            let key = segment.as_key()?;
            current = child(current, key)?;
        }
        Some(current)
    }

    fn walk(&self, visitor: &mut dyn FnMut(&FieldPath, &Value)) {
        walk_value(self, &mut FieldPath::new(), &mut |path: &FieldPath, leaf: &Value| {
            visitor(path, leaf);
        });
    }
}

impl<T: TreeSource + ?Sized> TreeSource for &T {
    fn get_in(&self, path: &FieldPath) -> Option<&Value> {
        (**self).get_in(path)
    }

    fn walk(&self, visitor: &mut dyn FnMut(&FieldPath, &Value)) {
        (**self).walk(visitor);
    }
}

fn child<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Depth-first leaf traversal. Leaves are handed out with the tree's own
/// lifetime so callers may keep them.
fn walk_value<'v, F>(value: &'v Value, path: &mut FieldPath, visitor: &mut F)
where
    F: FnMut(&FieldPath, &'v Value),
{
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                path.push(Segment::Key(key.clone()));
                walk_value(child, path, visitor);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(index);
                walk_value(child, path, visitor);
                path.pop();
            }
        }
        leaf => visitor(path, leaf),
    }
}

// ============================================================================
// JSON TREE
// ============================================================================

/// A [`TreeSource`] over an owned `serde_json::Value`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonTree {
    root: Value,
}

impl JsonTree {
    /// Wraps an existing value.
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Parses JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, TreeError> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    /// The wrapped value.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Unwraps the value.
    pub fn into_inner(self) -> Value {
        self.root
    }

    /// Collects every `(path, leaf)` pair in walk order.
    pub fn leaves(&self) -> Vec<(FieldPath, &Value)> {
        let mut out = Vec::new();
        walk_value(&self.root, &mut FieldPath::new(), &mut |path: &FieldPath, leaf| {
            out.push((path.clone(), leaf));
        });
        out
    }
}

impl From<Value> for JsonTree {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

impl TreeSource for JsonTree {
    fn get_in(&self, path: &FieldPath) -> Option<&Value> {
        self.root.get_in(path)
    }

    fn walk(&self, visitor: &mut dyn FnMut(&FieldPath, &Value)) {
        self.root.walk(visitor);
    }
}
