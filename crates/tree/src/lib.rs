//! # treecheck-tree
//!
//! Addressing and reading nested, read-only tree data.
//!
//! - [`FieldPath`] / [`Segment`]: an ordered list of literal keys and
//!   wildcard markers, used both to address a value and to derive an
//!   error key.
//! - [`TreeSource`]: the two read operations a validator needs from a tree,
//!   a deep lookup and a deterministic walk over every leaf.
//! - [`JsonTree`]: a [`TreeSource`] over `serde_json::Value`.
//!
//! ```
//! use treecheck_tree::{FieldPath, JsonTree, TreeSource};
//! use serde_json::json;
//!
//! let tree = JsonTree::new(json!({"person": {"email": "joe@example.com"}}));
//! let path = FieldPath::from_keys(["person", "email"]);
//! assert_eq!(tree.get_in(&path), Some(&json!("joe@example.com")));
//! ```

pub mod error;
pub mod path;
pub mod source;

pub use error::TreeError;
pub use path::{FieldPath, Segment, WILDCARD};
pub use source::{JsonTree, TreeSource};
