//! Builtin named predicates, organised by category.
//!
//! | category | names |
//! |---|---|
//! | [`presence`] | `notOptional` `notEmpty` `nullType` `alwaysValid` `alwaysInvalid` |
//! | [`types`] | `stringType` `intType` `floatType` `numericVal` `intVal` `boolType` `arrayType` `objectType` `scalarVal` |
//! | [`string`] | `email` `regex` `length` `alnum` `alpha` `digit` `lowercase` `uppercase` `startsWith` `endsWith` `contains` `hexRgbColor` `url` |
//! | [`value`] | `equals` `in` `min` `max` `between` `positive` `negative` |
//!
//! Every predicate accepts any JSON value and fails, rather than erroring,
//! on a value of the wrong type.

pub mod presence;
pub mod string;
pub mod types;
pub mod value;
