//! Common imports.
//!
//! ```
//! use treecheck_predicate::prelude::*;
//! ```

pub use crate::chain::{ChainBuilder, Modifier};
pub use crate::combinators::CombinatorKind;
pub use crate::error::{LibraryError, ValidationError};
pub use crate::foundation::{BoxPredicate, Predicate, PredicateExt};
pub use crate::registry::{PredicateLibrary, PredicateRegistry};
