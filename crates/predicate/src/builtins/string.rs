//! String content predicates
//!
//! Predicates for checking string content and patterns. Non-string values
//! fail, except where noted.

use std::sync::LazyLock;

use crate::ValidationError;
use crate::args::Args;
use crate::error::LibraryError;
use crate::foundation::BoxPredicate;
use crate::value_utils::{scalar_text, value_type_name};
use regex::Regex;
use serde_json::Value;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static HEX_RGB_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

// ============================================================================
// FORMATS
// ============================================================================

crate::predicate! {
    /// Validates email format.
    ///
    /// Uses a simple but effective regex pattern.
    pub Email;
    rule(input) { input.as_str().is_some_and(|s| EMAIL_REGEX.is_match(s)) }
    error(input) { ValidationError::invalid_format("email") }
}

crate::predicate! {
    /// Validates URL format (`http` and `https` only).
    pub Url;
    rule(input) { input.as_str().is_some_and(|s| URL_REGEX.is_match(s)) }
    error(input) { ValidationError::invalid_format("url") }
}

crate::predicate! {
    /// `#abc` or `#aabbcc`, with or without the leading `#`.
    pub HexRgbColor;
    rule(input) { input.as_str().is_some_and(|s| HEX_RGB_REGEX.is_match(s)) }
    error(input) { ValidationError::invalid_format("hex rgb color") }
}

crate::predicate! {
    /// Every cased character is lowercase.
    pub Lowercase;
    rule(input) { input.as_str().is_some_and(|s| s == s.to_lowercase()) }
    error(input) { ValidationError::invalid_format("lowercase") }
}

crate::predicate! {
    /// Every cased character is uppercase.
    pub Uppercase;
    rule(input) { input.as_str().is_some_and(|s| s == s.to_uppercase()) }
    error(input) { ValidationError::invalid_format("uppercase") }
}

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

/// ASCII character class tested by [`Chars`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Alnum,
    Alpha,
    Digit,
}

impl CharClass {
    fn admits(self, c: char) -> bool {
        match self {
            Self::Alnum => c.is_ascii_alphanumeric(),
            Self::Alpha => c.is_ascii_alphabetic(),
            Self::Digit => c.is_ascii_digit(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Alnum => "alnum",
            Self::Alpha => "alpha",
            Self::Digit => "digit",
        }
    }
}

crate::predicate! {
    /// A non-empty string made of one character class, plus any extra
    /// characters given. Integers are checked through their decimal text.
    #[derive(PartialEq, Eq)]
    pub Chars { class: CharClass, extra: String };
    rule(self, input) {
        let text = match input {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.is_u64() => Some(n.to_string()),
            _ => None,
        };
        text.is_some_and(|s| {
            !s.is_empty() && s.chars().all(|c| self.class.admits(c) || self.extra.contains(c))
        })
    }
    error(self, input) { ValidationError::invalid_format(self.class.name()) }
    new(class: CharClass, extra: impl Into<String>) { Self { class, extra: extra.into() } }
}

fn char_class(class: CharClass, args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    let mut extra = String::new();
    for index in 0..args.len() {
        extra.push_str(args.string(index)?);
    }
    Ok(Box::new(Chars::new(class, extra)))
}

/// `alnum(...extraChars)`
pub fn alnum(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    char_class(CharClass::Alnum, args)
}

/// `alpha(...extraChars)`
pub fn alpha(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    char_class(CharClass::Alpha, args)
}

/// `digit(...extraChars)`
pub fn digit(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    char_class(CharClass::Digit, args)
}

// ============================================================================
// REGEX
// ============================================================================

crate::predicate! {
    /// Validates that a string (or a number's text) matches a pattern.
    pub MatchesRegex { pattern: Regex };
    rule(self, input) {
        match input {
            Value::String(s) => self.pattern.is_match(s),
            Value::Number(n) => self.pattern.is_match(&n.to_string()),
            _ => false,
        }
    }
    error(self, input) {
        ValidationError::invalid_format("regex")
            .with_param("pattern", self.pattern.as_str().to_owned())
    }
}

/// `regex(pattern)`, where the pattern may be `/delimited/flags`
pub fn regex(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    args.expect_count(1..=1)?;
    Ok(Box::new(MatchesRegex::new(args.regex(0)?)))
}

// ============================================================================
// LENGTH
// ============================================================================

crate::predicate! {
    /// Character count of a string, or entry count of an array or object,
    /// within bounds. `None` leaves a side open.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub Length { min: Option<usize>, max: Option<usize>, inclusive: bool };
    rule(self, input) { measure(input).is_some_and(|len| self.admits(len)) }
    error(self, input) {
        match measure(input) {
            Some(len) => ValidationError::length(self.min, self.max, len),
            None => ValidationError::type_mismatch("string, array or object", value_type_name(input)),
        }
    }
    new(min: Option<usize>, max: Option<usize>) { Self { min, max, inclusive: true } }
}

impl Length {
    /// Bounds that exclude their endpoints.
    #[must_use]
    pub fn exclusive(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            min,
            max,
            inclusive: false,
        }
    }

    fn admits(&self, len: usize) -> bool {
        let above = self
            .min
            .is_none_or(|min| if self.inclusive { len >= min } else { len > min });
        let below = self
            .max
            .is_none_or(|max| if self.inclusive { len <= max } else { len < max });
        above && below
    }
}

fn measure(input: &Value) -> Option<usize> {
    match input {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(entries) => Some(entries.len()),
        _ => None,
    }
}

/// `length(min, max = null, inclusive = true)`
pub fn length(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    args.expect_count(1..=3)?;
    let min = args.opt_usize(0)?;
    let max = args.opt_usize(1)?;
    let inclusive = args.opt_bool(2, true)?;

    if min.is_none() && max.is_none() {
        return Err(LibraryError::invalid_argument(
            args.name(),
            0,
            "at least one bound is required",
        ));
    }
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(LibraryError::invalid_argument(
                args.name(),
                1,
                format!("maximum {hi} is below minimum {lo}"),
            ));
        }
    }

    Ok(Box::new(if inclusive {
        Length::new(min, max)
    } else {
        Length::exclusive(min, max)
    }))
}

// ============================================================================
// AFFIXES
// ============================================================================

/// Where [`Affix`] looks for its needle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffixPosition {
    Start,
    End,
    Anywhere,
}

crate::predicate! {
    /// Substring test on strings; element test on arrays (first element,
    /// last element, or any element).
    pub Affix { needle: Value, position: AffixPosition };
    rule(self, input) {
        match input {
            Value::String(s) => scalar_text(&self.needle).is_some_and(|needle| match self.position {
                AffixPosition::Start => s.starts_with(needle.as_str()),
                AffixPosition::End => s.ends_with(needle.as_str()),
                AffixPosition::Anywhere => s.contains(needle.as_str()),
            }),
            Value::Array(items) => match self.position {
                AffixPosition::Start => items.first() == Some(&self.needle),
                AffixPosition::End => items.last() == Some(&self.needle),
                AffixPosition::Anywhere => items.contains(&self.needle),
            },
            _ => false,
        }
    }
    error(self, input) {
        let code = match self.position {
            AffixPosition::Start => "starts_with",
            AffixPosition::End => "ends_with",
            AffixPosition::Anywhere => "contains",
        };
        ValidationError::new(code, "Value does not contain the expected part")
            .with_param("needle", self.needle.to_string())
    }
}

fn affix(position: AffixPosition, args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    args.expect_count(1..=1)?;
    Ok(Box::new(Affix::new(args.value(0)?.clone(), position)))
}

/// `startsWith(needle)`
pub fn starts_with(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    affix(AffixPosition::Start, args)
}

/// `endsWith(needle)`
pub fn ends_with(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    affix(AffixPosition::End, args)
}

/// `contains(needle)`
pub fn contains(args: &Args<'_>) -> Result<BoxPredicate, LibraryError> {
    affix(AffixPosition::Anywhere, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Predicate;
    use crate::registry::{PredicateLibrary, PredicateRegistry};
    use rstest::rstest;
    use serde_json::json;

    fn build(name: &str, args: &[Value]) -> BoxPredicate {
        PredicateRegistry::new().predicate(name, args).unwrap()
    }

    #[rstest]
    #[case("johndoe@example.com", true)]
    #[case("john.doe+tag@sub.example.org", true)]
    #[case("johndoe.com", false)]
    #[case("john@", false)]
    #[case("", false)]
    fn email(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(Email.is_valid(&json!(input)), expected);
    }

    #[test]
    fn email_rejects_non_strings() {
        assert!(!Email.is_valid(&json!(null)));
        assert!(!Email.is_valid(&json!(42)));
    }

    #[rstest]
    #[case("https://example.com/path?q=1", true)]
    #[case("http://localhost:8080", true)]
    #[case("ftp://example.com", false)]
    #[case("example.com", false)]
    fn url(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(Url.is_valid(&json!(input)), expected);
    }

    #[rstest]
    #[case("#fff", true)]
    #[case("A0b1C2", true)]
    #[case("#ffff", false)]
    #[case("#ggg", false)]
    fn hex_rgb_color(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(HexRgbColor.is_valid(&json!(input)), expected);
    }

    #[test]
    fn regex_with_delimiters_and_flags() {
        let name = build("regex", &[json!(r"/^[\w_.-]+$/i")]);
        assert!(name.is_valid(&json!("John_Doe")));
        assert!(!name.is_valid(&json!("Joe`")));
        assert!(name.is_valid(&json!(1234)));
        assert!(!name.is_valid(&json!(null)));
    }

    #[test]
    fn regex_argument_errors() {
        let registry = PredicateRegistry::new();
        assert!(matches!(
            registry.predicate("regex", &[]),
            Err(LibraryError::Arity { .. })
        ));
        assert!(matches!(
            registry.predicate("regex", &[json!("/(/")]),
            Err(LibraryError::InvalidPattern { .. })
        ));
    }

    #[rstest]
    #[case(&[json!(6), json!(40)], json!("john"), false)]
    #[case(&[json!(2), json!(40)], json!("john"), true)]
    #[case(&[json!(2), json!(4)], json!("jöhn"), true)]
    #[case(&[json!(null), json!(3)], json!([1, 2, 3]), true)]
    #[case(&[json!(1)], json!({}), false)]
    #[case(&[json!(2), json!(4), json!(false)], json!("abcd"), false)]
    #[case(&[json!(2), json!(4), json!(false)], json!("abc"), true)]
    #[case(&[json!(0)], json!(12), false)]
    fn length_bounds(#[case] args: &[Value], #[case] input: Value, #[case] expected: bool) {
        assert_eq!(build("length", args).is_valid(&input), expected);
    }

    #[test]
    fn length_argument_errors() {
        let registry = PredicateRegistry::new();
        assert!(registry.predicate("length", &[json!(null), json!(null)]).is_err());
        assert!(registry.predicate("length", &[json!(5), json!(2)]).is_err());
        assert!(registry.predicate("length", &[json!(-1)]).is_err());
    }

    #[test]
    fn length_error_params() {
        let err = Length::new(Some(6), Some(40)).evaluate(&json!("john")).unwrap_err();
        assert_eq!(err.param("actual"), Some("4"));
        assert_eq!(err.message, "Length must be between 6 and 40");
    }

    #[rstest]
    #[case("alnum", &[], json!("abc123"), true)]
    #[case("alnum", &[], json!("abc 123"), false)]
    #[case("alnum", &[json!(" ")], json!("abc 123"), true)]
    #[case("alpha", &[], json!("abc1"), false)]
    #[case("alpha", &[json!("-_")], json!("a-b_c"), true)]
    #[case("digit", &[], json!("0042"), true)]
    #[case("digit", &[], json!(42), true)]
    #[case("digit", &[], json!(""), false)]
    fn character_classes(
        #[case] name: &str,
        #[case] args: &[Value],
        #[case] input: Value,
        #[case] expected: bool,
    ) {
        assert_eq!(build(name, args).is_valid(&input), expected);
    }

    #[test]
    fn case_predicates() {
        assert!(Lowercase.is_valid(&json!("abc-1")));
        assert!(!Lowercase.is_valid(&json!("aBc")));
        assert!(Uppercase.is_valid(&json!("ABC-1")));
        assert!(!Uppercase.is_valid(&json!(1)));
    }

    #[rstest]
    #[case("startsWith", json!("jo"), json!("joe"), true)]
    #[case("startsWith", json!(1), json!([1, 2]), true)]
    #[case("endsWith", json!(".com"), json!("joe.com"), true)]
    #[case("endsWith", json!(1), json!([1, 2]), false)]
    #[case("contains", json!("oe"), json!("joe"), true)]
    #[case("contains", json!("x"), json!(["a", "x"]), true)]
    #[case("contains", json!("x"), json!(null), false)]
    fn affixes(
        #[case] name: &str,
        #[case] needle: Value,
        #[case] input: Value,
        #[case] expected: bool,
    ) {
        assert_eq!(build(name, &[needle]).is_valid(&input), expected);
    }
}
