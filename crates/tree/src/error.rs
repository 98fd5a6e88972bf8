//! Errors raised while constructing a tree.

/// Failure to build a [`JsonTree`](crate::JsonTree) from text.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The input was not valid JSON.
    #[error("failed to parse tree data: {0}")]
    Parse(#[from] serde_json::Error),
}
