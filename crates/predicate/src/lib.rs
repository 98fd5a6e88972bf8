//! # treecheck-predicate
//!
//! The predicate library behind treecheck schemas: unary checks over a
//! `serde_json::Value`, looked up by name with literal arguments.
//!
//! ## Quick Start
//!
//! ```
//! use treecheck_predicate::prelude::*;
//! use serde_json::json;
//!
//! let registry = PredicateRegistry::new();
//! let name = registry.predicate("length", &[json!(2), json!(40)]).unwrap();
//! assert!(name.is_valid(&json!("Joe")));
//! assert!(!name.is_valid(&json!("J")));
//!
//! // Fluent chains: `nullable` guards every step folded after it.
//! let email = registry
//!     .chain()
//!     .modify(Modifier::Nullable, Vec::new())
//!     .push(registry.predicate("email", &[]).unwrap())
//!     .build();
//! assert!(email.is_valid(&json!(null)));
//! assert!(!email.is_valid(&json!("x")));
//! ```
//!
//! ## Building blocks
//!
//! - [`Predicate`]: the core trait, `evaluate(&Value) -> Result<(), ValidationError>`
//! - [`combinators`]: `allOf`, `anyOf`, `noneOf`, `oneOf`, `not`
//! - [`chain`]: the `nullable` / `optional` modifiers and [`ChainBuilder`]
//! - [`PredicateRegistry`]: builtin named predicates, extensible via
//!   [`PredicateRegistry::register`]

pub mod args;
pub mod builtins;
pub mod chain;
pub mod combinators;
pub mod error;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod regex_cache;
pub mod registry;
pub mod value_utils;

pub use args::Args;
pub use chain::{ChainBuilder, ChainPredicate, Guarded, Modifier};
pub use combinators::{AllOf, AnyOf, CombinatorKind, NoneOf, Not, OneOf};
pub use error::{LibraryError, ValidationError};
pub use foundation::{BoxPredicate, Predicate, PredicateExt};
pub use regex_cache::RegexCache;
pub use registry::{PredicateFactory, PredicateLibrary, PredicateRegistry};

/// Re-exported so [`predicate!`] expansions name one `Value` type.
pub use serde_json::Value;
