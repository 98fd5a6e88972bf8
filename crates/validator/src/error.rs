//! Schema errors
//!
//! A [`SchemaError`] aborts a whole validation call. Rule failures are not
//! errors; they end up in the [`ErrorMap`](crate::ErrorMap).

use treecheck_predicate::LibraryError;

/// The schema itself is unusable.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A rule definition lacks `field`, `rule` or `message`.
    #[error("invalid rule definition.")]
    InvalidDefinition {
        /// Position of the offending entry, when known.
        index: Option<usize>,
    },

    /// The schema is not an array of rule definitions.
    #[error("schema must be an array of rule definitions, got {found}")]
    NotASequence { found: &'static str },

    /// Schema text is not valid JSON.
    #[error("failed to parse schema: {0}")]
    Json(#[from] serde_json::Error),

    /// A predicate could not be built (strict mode only).
    #[error("rule for '{field}' cannot be built: {source}")]
    UnresolvedPredicate {
        field: String,
        #[source]
        source: LibraryError,
    },
}

impl SchemaError {
    pub(crate) fn invalid_definition(index: Option<usize>) -> Self {
        Self::InvalidDefinition { index }
    }
}

/// Result alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
