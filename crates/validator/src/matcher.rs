//! Wildcard path matching
//!
//! A wildcard field is resolved by walking every leaf of the tree and
//! keeping the leaves whose full path the field describes. A match must
//! reach a real leaf: a field that stops at an intermediate node matches
//! nothing, and so does a field that reaches past the tree's depth.

use serde_json::Value;
use treecheck_tree::{FieldPath, Segment, TreeSource};

/// True iff any segment of `path` is the wildcard.
#[inline]
pub fn has_wildcard(path: &FieldPath) -> bool {
    path.has_wildcard()
}

/// Whether `pattern` describes the leaf path `leaf`.
///
/// Walks both paths position by position, collecting the leaf segment
/// wherever the pattern has a wildcard or the same literal. The leaf
/// matches iff the collected sequence equals the leaf path.
///
/// ```
/// use treecheck_tree::FieldPath;
/// use treecheck_validator::matcher::matches;
///
/// let pattern = FieldPath::from_keys(["lang", "*", "name"]);
/// assert!(matches(&pattern, &FieldPath::from_keys(["lang", "de", "name"])));
/// assert!(!matches(&pattern, &FieldPath::from_keys(["lang", "de", "title"])));
/// assert!(!matches(&pattern, &FieldPath::from_keys(["lang", "de"])));
/// assert!(!matches(&pattern, &FieldPath::from_keys(["lang", "de", "name", "x"])));
/// ```
pub fn matches(pattern: &FieldPath, leaf: &FieldPath) -> bool {
    if leaf.len() < pattern.len() {
        return false;
    }

    let mut collected: Vec<&Segment> = Vec::with_capacity(pattern.len());
    for (want, got) in pattern.iter().zip(leaf) {
        if want.is_wildcard() || want == got {
            collected.push(got);
        }
    }

    collected.len() == leaf.len() && collected.into_iter().eq(leaf.iter())
}

/// Calls `visit` for every leaf of `source` matched by `pattern`, in walk
/// order.
pub fn for_each_match<S, F>(pattern: &FieldPath, source: &S, mut visit: F)
where
    S: TreeSource + ?Sized,
    F: FnMut(&FieldPath, &Value),
{
    source.walk(&mut |leaf: &FieldPath, value: &Value| {
        if matches(pattern, leaf) {
            visit(leaf, value);
        }
    });
}

/// Every `(concrete path, value)` pair matched by `pattern`, in walk order.
pub fn expand<S>(pattern: &FieldPath, source: &S) -> Vec<(FieldPath, Value)>
where
    S: TreeSource + ?Sized,
{
    let mut found = Vec::new();
    for_each_match(pattern, source, |path, value| {
        found.push((path.clone(), value.clone()));
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn path(keys: &[&str]) -> FieldPath {
        FieldPath::from_keys(keys.iter().copied())
    }

    #[rstest]
    #[case(&["a", "*"], &["a", "b"], true)]
    #[case(&["*", "*"], &["a", "b"], true)]
    #[case(&["a", "b"], &["a", "b"], true)]
    #[case(&["a", "*"], &["x", "b"], false)]
    #[case(&["a", "*"], &["a"], false)]
    #[case(&["a"], &["a", "b"], false)]
    #[case(&["*"], &["0"], true)]
    fn matching(#[case] pattern: &[&str], #[case] leaf: &[&str], #[case] expected: bool) {
        assert_eq!(matches(&path(pattern), &path(leaf)), expected);
    }

    #[test]
    fn expand_in_walk_order() {
        let data = json!({
            "color": "red",
            "lang": {
                "de": {"name": "Sepp", "description": "x"},
                "en": {"name": "Joe"},
            }
        });
        let found = expand(&path(&["lang", "*", "name"]), &data);
        assert_eq!(
            found,
            vec![
                (path(&["lang", "de", "name"]), json!("Sepp")),
                (path(&["lang", "en", "name"]), json!("Joe")),
            ]
        );
    }

    #[test]
    fn expand_over_arrays() {
        let data = json!({"items": [{"sku": "a"}, {"sku": "b"}, {}]});
        let found = expand(&path(&["items", "*", "sku"]), &data);
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].0, path(&["items", "1", "sku"]));
    }

    #[test]
    fn pattern_deeper_than_branch_matches_nothing() {
        let data = json!({"lang": {"de": "Sepp", "en": {"name": "Joe"}}});
        let found = expand(&path(&["lang", "*", "name"]), &data);
        assert_eq!(found, vec![(path(&["lang", "en", "name"]), json!("Joe"))]);
    }

    #[test]
    fn wildcard_helper() {
        assert!(has_wildcard(&path(&["a", "*"])));
        assert!(!has_wildcard(&path(&["a", "b"])));
    }
}
