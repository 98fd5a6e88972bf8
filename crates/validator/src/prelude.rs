//! Common imports.
//!
//! ```
//! use treecheck_validator::prelude::*;
//! ```

pub use crate::config::{UnresolvedPolicy, ValidatorConfig};
pub use crate::error::{SchemaError, SchemaResult};
pub use crate::error_map::ErrorMap;
pub use crate::rule::Rule;
pub use crate::rule_spec::RuleSpec;
pub use crate::schema::Schema;
pub use crate::validator::MapValidator;
pub use treecheck_predicate::prelude::*;
pub use treecheck_tree::{FieldPath, JsonTree, Segment, TreeSource};
