//! Normalised rule definitions
//!
//! A schema writes its predicate logic as loose JSON: a bare name, a
//! `[name, ...args]` array, a `[combinator, ...operands]` array or an array
//! of steps. [`RuleSpec::from_value`] maps every such value onto one of
//! three tagged forms; the mapping is total.
//!
//! | raw | normalised |
//! |---|---|
//! | `"email"` | `Named("email", [])` |
//! | `["length", 6, 40]` | `Named("length", [6, 40])` |
//! | `["allOf", ["regex", "/x/"], "email"]` | `Combinator(allOf, [Named, Named])` |
//! | `[["regex", "/x/"], ["length", 2, 40]]` | `Chain([Named, Named])` |
//! | `["nullable", "email"]` | `Chain([Named("nullable"), Named("email")])` |
//! | `[]` | `Chain([])`, which never passes |

use serde::de::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use treecheck_predicate::{CombinatorKind, Modifier};

/// The recursive, normalised form of one rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSpec {
    /// A leaf predicate with literal arguments.
    Named { name: String, args: Vec<Value> },

    /// A boolean operator over independently compiled operands.
    Combinator {
        kind: CombinatorKind,
        operands: Vec<RuleSpec>,
    },

    /// Steps folded, in order, into one accumulating chain.
    Chain(Vec<RuleSpec>),
}

impl RuleSpec {
    /// Shorthand for a [`RuleSpec::Named`] without arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Normalises a raw rule value.
    pub fn from_value(raw: &Value) -> Self {
        match raw {
            Value::Array(items) => Self::from_items(items),
            scalar => Self::from_items(std::slice::from_ref(scalar)),
        }
    }

    fn from_items(items: &[Value]) -> Self {
        let Some((head, rest)) = items.split_first() else {
            return Self::Chain(Vec::new());
        };

        match head {
            Value::Array(_) => Self::Chain(items.iter().map(Self::step).collect()),
            Value::String(name) => {
                if let Some(kind) = CombinatorKind::from_name(name) {
                    Self::Combinator {
                        kind,
                        operands: rest.iter().map(Self::from_value).collect(),
                    }
                } else if Modifier::from_name(name).is_some() {
                    let head = Self::named(name.as_str());
                    Self::Chain(std::iter::once(head).chain(rest.iter().map(Self::step)).collect())
                } else {
                    Self::Named {
                        name: name.clone(),
                        args: rest.to_vec(),
                    }
                }
            }
            // Non-string heads become names no library resolves, so they
            // fail at evaluation time.
            other => Self::Named {
                name: other.to_string(),
                args: rest.to_vec(),
            },
        }
    }

    /// A chain step. A bare modifier name stays a plain step so that it
    /// guards the steps after it.
    fn step(raw: &Value) -> Self {
        match raw.as_str() {
            Some(name) if Modifier::from_name(name).is_some() => Self::named(name),
            _ => Self::from_value(raw),
        }
    }

    /// True for the empty chain, which compiles to nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Chain(steps) if steps.is_empty())
    }

    /// Every predicate name mentioned, depth first.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Named { name, .. } => out.push(name),
            Self::Combinator { kind, operands } => {
                out.push(kind.name());
                for operand in operands {
                    operand.collect_names(out);
                }
            }
            Self::Chain(steps) => {
                for step in steps {
                    step.collect_names(out);
                }
            }
        }
    }
}

impl From<&Value> for RuleSpec {
    fn from(raw: &Value) -> Self {
        Self::from_value(raw)
    }
}

impl From<Value> for RuleSpec {
    fn from(raw: Value) -> Self {
        Self::from_value(&raw)
    }
}

impl From<&str> for RuleSpec {
    fn from(name: &str) -> Self {
        Self::from_value(&Value::String(name.to_owned()))
    }
}

impl<'de> Deserialize<'de> for RuleSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|raw| Self::from_value(&raw))
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Self::Combinator { kind, operands } => {
                write!(f, "{kind}(")?;
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{operand}")?;
                }
                write!(f, ")")
            }
            Self::Chain(steps) => {
                if steps.is_empty() {
                    return write!(f, "<empty>");
                }
                for (i, step) in steps.iter().enumerate() {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{step}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn named(name: &str, args: Vec<Value>) -> RuleSpec {
        RuleSpec::Named {
            name: name.to_owned(),
            args,
        }
    }

    #[rstest]
    #[case(json!("email"), named("email", vec![]))]
    #[case(json!(["notOptional"]), named("notOptional", vec![]))]
    #[case(json!(["length", 6, 40]), named("length", vec![json!(6), json!(40)]))]
    #[case(json!([]), RuleSpec::Chain(vec![]))]
    #[case(json!(5), named("5", vec![]))]
    #[case(json!([true, 1]), named("true", vec![json!(1)]))]
    #[case(json!({"a": 1}), named(r#"{"a":1}"#, vec![]))]
    #[case(json!("nullable"), RuleSpec::Chain(vec![named("nullable", vec![])]))]
    #[case(json!("allOf"), RuleSpec::Combinator { kind: CombinatorKind::AllOf, operands: vec![] })]
    fn leaves(#[case] raw: Value, #[case] expected: RuleSpec) {
        assert_eq!(RuleSpec::from_value(&raw), expected);
    }

    #[test]
    fn combinator_operands_are_normalised() {
        let spec = RuleSpec::from_value(&json!([
            "allOf",
            ["regex", "/^[\\w_.-]+$/i"],
            ["length", 6, 40],
            "email"
        ]));
        assert_eq!(
            spec,
            RuleSpec::Combinator {
                kind: CombinatorKind::AllOf,
                operands: vec![
                    named("regex", vec![json!("/^[\\w_.-]+$/i")]),
                    named("length", vec![json!(6), json!(40)]),
                    named("email", vec![]),
                ],
            }
        );
    }

    #[test]
    fn array_of_arrays_is_a_chain() {
        let spec = RuleSpec::from_value(&json!([["regex", "/x/"], ["length", 2, 40]]));
        assert_eq!(
            spec,
            RuleSpec::Chain(vec![
                named("regex", vec![json!("/x/")]),
                named("length", vec![json!(2), json!(40)]),
            ])
        );
    }

    #[rstest]
    #[case("nullable")]
    #[case("optional")]
    fn modifier_head_is_a_chain(#[case] modifier: &str) {
        let spec = RuleSpec::from_value(&json!([modifier, "email"]));
        assert_eq!(
            spec,
            RuleSpec::Chain(vec![named(modifier, vec![]), named("email", vec![])])
        );
    }

    #[test]
    fn modifiers_inside_chains_stay_steps() {
        let spec = RuleSpec::from_value(&json!([["notOptional"], "nullable", "email"]));
        assert_eq!(
            spec,
            RuleSpec::Chain(vec![
                named("notOptional", vec![]),
                named("nullable", vec![]),
                named("email", vec![]),
            ])
        );
        let spec = RuleSpec::from_value(&json!(["nullable", "optional", "email"]));
        assert_eq!(
            spec,
            RuleSpec::Chain(vec![
                named("nullable", vec![]),
                named("optional", vec![]),
                named("email", vec![]),
            ])
        );
    }

    #[test]
    fn empty_and_names() {
        assert!(RuleSpec::from_value(&json!([])).is_empty());
        let spec = RuleSpec::from_value(&json!(["not", ["anyOf", "email", "url"]]));
        assert_eq!(spec.names(), vec!["not", "anyOf", "email", "url"]);
    }

    #[test]
    fn display() {
        let spec = RuleSpec::from_value(&json!(["nullable", ["length", 2, 40]]));
        assert_eq!(spec.to_string(), "nullable().length(2, 40)");
    }

    #[test]
    fn deserialize_uses_normalisation() {
        let spec: RuleSpec = serde_json::from_str(r#"["oneOf", "intType", "floatType"]"#).unwrap();
        assert!(matches!(spec, RuleSpec::Combinator { kind: CombinatorKind::OneOf, ref operands } if operands.len() == 2));
    }
}
