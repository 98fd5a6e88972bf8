//! Literal arguments handed to a predicate factory

use crate::error::LibraryError;
use crate::regex_cache::RegexCache;
use crate::value_utils::{as_numeric, value_type_name};
use regex::Regex;
use serde_json::Value;
use std::ops::RangeInclusive;

/// The arguments of one named predicate, with typed accessors that report
/// failures as [`LibraryError`]s naming the predicate.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    name: &'a str,
    values: &'a [Value],
    regexes: &'a RegexCache,
}

impl<'a> Args<'a> {
    pub fn new(name: &'a str, values: &'a [Value], regexes: &'a RegexCache) -> Self {
        Self {
            name,
            values,
            regexes,
        }
    }

    /// Name of the predicate being built
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// Fails unless the argument count lies in `range`.
    pub fn expect_count(&self, range: RangeInclusive<usize>) -> Result<(), LibraryError> {
        if range.contains(&self.values.len()) {
            return Ok(());
        }
        let expected = if range.start() == range.end() {
            range.start().to_string()
        } else {
            format!("{}..={}", range.start(), range.end())
        };
        Err(LibraryError::Arity {
            name: self.name.to_owned(),
            expected,
            actual: self.values.len(),
        })
    }

    /// Argument at `index`, which must be present.
    pub fn value(&self, index: usize) -> Result<&'a Value, LibraryError> {
        self.values
            .get(index)
            .ok_or_else(|| self.invalid(index, "missing argument"))
    }

    pub fn string(&self, index: usize) -> Result<&'a str, LibraryError> {
        let value = self.value(index)?;
        value.as_str().ok_or_else(|| {
            self.invalid(
                index,
                format!("expected a string, got {}", value_type_name(value)),
            )
        })
    }

    /// Numeric argument; numeric strings are accepted.
    pub fn number(&self, index: usize) -> Result<f64, LibraryError> {
        let value = self.value(index)?;
        as_numeric(value).ok_or_else(|| {
            self.invalid(
                index,
                format!("expected a number, got {}", value_type_name(value)),
            )
        })
    }

    /// Optional non-negative integer bound; absent or `null` means none.
    pub fn opt_usize(&self, index: usize) -> Result<Option<usize>, LibraryError> {
        match self.values.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.invalid(index, "expected a non-negative integer")),
        }
    }

    /// Optional flag; absent or `null` yields `default`.
    pub fn opt_bool(&self, index: usize, default: bool) -> Result<bool, LibraryError> {
        match self.values.get(index) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.invalid(
                index,
                format!("expected a boolean, got {}", value_type_name(other)),
            )),
        }
    }

    /// Compiles the pattern at `index` through the shared cache.
    pub fn regex(&self, index: usize) -> Result<Regex, LibraryError> {
        let pattern = self.string(index)?;
        self.regexes.get_or_compile(pattern)
    }

    fn invalid(&self, index: usize, reason: impl Into<String>) -> LibraryError {
        LibraryError::invalid_argument(self.name, index, reason)
    }
}
