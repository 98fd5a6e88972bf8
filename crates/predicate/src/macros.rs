//! Macros for declaring predicates with minimal boilerplate.
//!
//! # Examples
//!
//! ```rust,ignore
//! use treecheck_predicate::predicate;
//! use treecheck_predicate::ValidationError;
//!
//! // Unit predicate (no fields)
//! predicate! {
//!     pub NullType;
//!     rule(input) { input.is_null() }
//!     error(input) { ValidationError::new("null_type", "Value must be null") }
//! }
//!
//! // Struct with fields
//! predicate! {
//!     pub StartsWith { prefix: String };
//!     rule(self, input) { input.as_str().is_some_and(|s| s.starts_with(&self.prefix)) }
//!     error(self, input) { ValidationError::new("starts_with", "wrong prefix") }
//!     new(prefix: impl Into<String>) { Self { prefix: prefix.into() } }
//! }
//! ```

/// Declares a predicate: struct definition, [`Predicate`](crate::Predicate)
/// implementation and constructor.
///
/// `#[derive(Debug, Clone)]` is always applied; unit predicates also get
/// `Copy`, `PartialEq`, `Eq`, `Hash` and `Default`.
///
/// # Variants
///
/// **Unit predicate**:
/// ```rust,ignore
/// predicate! {
///     pub NotOptional;
///     rule(input) { !input.is_null() }
///     error(input) { ValidationError::required() }
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields):
/// ```rust,ignore
/// predicate! {
///     pub Equals { expected: Value };
///     rule(self, input) { input == &self.expected }
///     error(self, input) { ValidationError::new("equals", "not equal") }
/// }
/// ```
///
/// **Custom constructor**:
/// ```rust,ignore
/// predicate! {
///     pub Length { min: Option<usize>, max: Option<usize>, inclusive: bool };
///     rule(self, input) { ... }
///     error(self, input) { ... }
///     new(min: Option<usize>, max: Option<usize>) { Self { min, max, inclusive: true } }
/// }
/// ```
#[macro_export]
macro_rules! predicate {
    // ── Unit predicate (no fields) ───────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::Predicate for $name {
            #[allow(unused_variables)]
            fn evaluate(&self, $inp: &$crate::Value) -> ::std::result::Result<(), $crate::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };

    // ── Struct with fields + custom new ──────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? };
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($narg: $naty),*) -> Self $new_body
        }

        impl $crate::Predicate for $name {
            #[allow(unused_variables)]
            fn evaluate(&$self_, $inp: &$crate::Value) -> ::std::result::Result<(), $crate::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };

    // ── Struct with fields + auto new ────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? };
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
    ) => {
        $crate::predicate! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ };
            rule($self_, $inp) $rule
            error($self2, $einp) $err
            new($($field: $fty),+) { Self { $($field),+ } }
        }
    };
}
