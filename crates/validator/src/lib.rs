//! # treecheck-validator
//!
//! Declarative validation of nested tree data. A schema is an ordered list
//! of rules; each names a field path (possibly with `*` wildcards), the
//! predicate logic the value must satisfy and the message reported when it
//! does not. The result is an insertion-ordered [`ErrorMap`] holding the
//! first failure per key.
//!
//! ```
//! use treecheck_validator::MapValidator;
//! use serde_json::json;
//!
//! let data = json!({
//!     "color": "red",
//!     "lang": {
//!         "de": {"name": "Sepp"},
//!         "en": {"name": "Joe!"}
//!     }
//! });
//! let schema = json!([
//!     {"field": ["lang", "*", "name"], "rule": "alnum", "message": "Name contains invalid characters"},
//!     {"field": "color", "rule": ["in", ["blue", "green"]], "message": "Unknown color"},
//! ]);
//!
//! let errors = MapValidator::new().validate(&data, &schema).unwrap();
//! assert_eq!(errors, [
//!     ("lang.en.name", "Name contains invalid characters"),
//!     ("color", "Unknown color"),
//! ]);
//! ```
//!
//! ## Rule syntax
//!
//! See [`rule_spec`] for how a raw `rule` value is read: a predicate name,
//! `[name, ...args]`, `[combinator, ...operands]`, an array of steps, or a
//! `nullable` / `optional` chain.

pub mod compile;
pub mod config;
pub mod error;
pub mod error_map;
pub mod matcher;
pub mod prelude;
pub mod rule;
pub mod rule_spec;
pub mod schema;
pub mod validator;

pub use config::{UnresolvedPolicy, ValidatorConfig};
pub use error::{SchemaError, SchemaResult};
pub use error_map::ErrorMap;
pub use rule::Rule;
pub use rule_spec::RuleSpec;
pub use schema::Schema;
pub use validator::MapValidator;
