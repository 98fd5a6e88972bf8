//! Error types for predicate failures and library lookups
//!
//! [`ValidationError`] describes why a value failed a predicate. It is the
//! structured, machine-readable side of a failure; the human-readable
//! message shown to users comes from the schema rule instead.
//!
//! [`LibraryError`] is returned when a predicate cannot be built at all:
//! unknown name, wrong argument count, unusable argument.
//!
//! String fields use `Cow<'static, str>` so static codes and messages do
//! not allocate.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured predicate failure.
///
/// # Examples
///
/// ```
/// use treecheck_predicate::ValidationError;
///
/// let error = ValidationError::new("length", "Length must be between 2 and 40")
///     .with_param("min", "2")
///     .with_param("max", "40");
/// assert_eq!(error.param("min"), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code for programmatic handling.
    ///
    /// Examples: "length", "email", "required"
    pub code: Cow<'static, str>,

    /// Default English description of the failure.
    pub message: Cow<'static, str>,

    /// Ordered key-value parameters (typically 0-3).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,

    /// Failures of operands, for combinators.
    pub nested: Vec<ValidationError>,
}

impl ValidationError {
    /// Creates a new error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces the nested errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested(mut self, errors: Vec<ValidationError>) -> Self {
        self.nested = errors;
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns the number of errors (including nested).
    #[must_use]
    pub fn total_error_count(&self) -> usize {
        1 + self
            .nested
            .iter()
            .map(ValidationError::total_error_count)
            .sum::<usize>()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        for (i, error) in self.nested.iter().enumerate() {
            write!(f, "\n    {}. {}", i + 1, error)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Value was null or empty where one is required.
    pub fn required() -> Self {
        Self::new("required", "Value is required")
    }

    /// Value had the wrong JSON type.
    pub fn type_mismatch(
        expected: impl Into<Cow<'static, str>>,
        actual: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new("type_mismatch", "Type mismatch")
            .with_param("expected", expected)
            .with_param("actual", actual)
    }

    /// Value did not match a textual format.
    pub fn invalid_format(expected: impl Into<Cow<'static, str>>) -> Self {
        Self::new("invalid_format", "Invalid format").with_param("expected", expected)
    }

    /// Length outside the accepted bounds; `None` means unbounded.
    pub fn length(min: Option<usize>, max: Option<usize>, actual: usize) -> Self {
        let describe = |bound: Option<usize>| bound.map_or_else(|| "-".to_owned(), |b| b.to_string());
        Self::new(
            "length",
            format!("Length must be between {} and {}", describe(min), describe(max)),
        )
        .with_param("min", describe(min))
        .with_param("max", describe(max))
        .with_param("actual", actual.to_string())
    }

    /// Number outside the accepted range.
    pub fn out_of_range<T: fmt::Display>(min: T, max: T, actual: T) -> Self {
        Self::new("out_of_range", format!("Value must be between {min} and {max}"))
            .with_param("min", min.to_string())
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// A "custom" error with a message.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("custom", message)
    }
}

// ============================================================================
// LIBRARY ERROR
// ============================================================================

/// A predicate could not be built from a name and its arguments.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum LibraryError {
    /// No predicate is registered under this name.
    #[error("unknown predicate '{name}'")]
    UnknownPredicate { name: String },

    /// Wrong number of arguments or operands.
    #[error("'{name}' expects {expected} argument(s), got {actual}")]
    Arity {
        name: String,
        expected: String,
        actual: usize,
    },

    /// An argument had an unusable type or value.
    #[error("invalid argument {index} for '{name}': {reason}")]
    InvalidArgument {
        name: String,
        index: usize,
        reason: String,
    },

    /// A pattern argument did not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl LibraryError {
    /// Creates an [`LibraryError::UnknownPredicate`].
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownPredicate { name: name.into() }
    }

    /// Creates an [`LibraryError::InvalidArgument`].
    pub fn invalid_argument(name: impl Into<String>, index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            index,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_error() {
        let error = ValidationError::new("test", "Test error");
        assert_eq!(error.code, "test");
        assert_eq!(error.message, "Test error");
    }

    #[test]
    fn test_error_with_params() {
        let error = ValidationError::new("min", "Too small")
            .with_param("min", "5")
            .with_param("actual", "3");

        assert_eq!(error.param("min"), Some("5"));
        assert_eq!(error.param("actual"), Some("3"));
        assert_eq!(error.param("max"), None);
    }

    #[test]
    fn test_nested_count() {
        let error = ValidationError::new("any_of", "No alternative passed").with_nested(vec![
            ValidationError::required(),
            ValidationError::invalid_format("email"),
        ]);
        assert_eq!(error.total_error_count(), 3);
    }

    #[test]
    fn test_length_unbounded_rendering() {
        let error = ValidationError::length(Some(2), None, 1);
        assert_eq!(error.param("max"), Some("-"));
        assert_eq!(error.message, "Length must be between 2 and -");
    }

    #[test]
    fn test_static_strings_do_not_allocate() {
        let error = ValidationError::required();
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }

    #[test]
    fn test_display_includes_params() {
        let error = ValidationError::type_mismatch("string", "number");
        assert_eq!(
            error.to_string(),
            "type_mismatch: Type mismatch (params: [expected=string, actual=number])"
        );
    }

    #[test]
    fn test_library_error_display() {
        assert_eq!(
            LibraryError::unknown("hexColour").to_string(),
            "unknown predicate 'hexColour'"
        );
    }
}
