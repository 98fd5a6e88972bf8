//! Field paths: ordered sequences of literal keys and wildcard markers.
//!
//! A bare string is a one-element path; it is never split on dots, so a key
//! such as `"a.b"` stays a single segment.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Textual form of the wildcard segment.
pub const WILDCARD: &str = "*";

// ============================================================================
// SEGMENT
// ============================================================================

/// One position in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A literal object key or array index.
    Key(String),
    /// Matches any key at this depth.
    Wildcard,
}

impl Segment {
    /// Builds a segment from its textual form; `"*"` becomes [`Segment::Wildcard`].
    pub fn parse(text: &str) -> Self {
        if text == WILDCARD {
            Self::Wildcard
        } else {
            Self::Key(text.to_owned())
        }
    }

    /// Returns `true` for the wildcard marker.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Returns the literal key, or `None` for the wildcard.
    #[inline]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Wildcard => None,
        }
    }

    /// Textual form, with the wildcard rendered as `*`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Key(key) => key,
            Self::Wildcard => WILDCARD,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Segment {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for Segment {
    fn from(text: String) -> Self {
        if text == WILDCARD {
            Self::Wildcard
        } else {
            Self::Key(text)
        }
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Key(index.to_string())
    }
}

struct SegmentVisitor;

impl Visitor<'_> for SegmentVisitor {
    type Value = Segment;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a key string, an array index or \"*\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Segment, E> {
        Ok(Segment::parse(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Segment, E> {
        Ok(Segment::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Segment, E> {
        Ok(Segment::Key(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Segment, E> {
        Ok(Segment::Key(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for Segment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SegmentVisitor)
    }
}

impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// FIELD PATH
// ============================================================================

/// An ordered sequence of [`Segment`]s addressing a position in a tree.
///
/// Equality is positional. Most real paths are shallow, so segments live
/// inline up to four deep.
///
/// # Examples
///
/// ```
/// use treecheck_tree::{FieldPath, Segment};
///
/// let path = FieldPath::from_keys(["lang", "*", "name"]);
/// assert!(path.has_wildcard());
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "lang.*.name");
/// assert_eq!(FieldPath::key("a.b").len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: SmallVec<[Segment; 4]>,
}

impl FieldPath {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a one-element path from a literal key (or `"*"`).
    pub fn key(key: impl Into<Segment>) -> Self {
        let mut path = Self::new();
        path.push(key);
        path
    }

    /// Creates a path from textual segments.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        keys.into_iter().map(Into::into).collect()
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.segments.push(segment.into());
    }

    /// Removes and returns the last segment.
    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if there are no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments in order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Iterates over the segments.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Returns `true` iff any segment is the wildcard marker.
    pub fn has_wildcard(&self) -> bool {
        self.segments.iter().any(Segment::is_wildcard)
    }

    /// Joins the textual segments with `separator`.
    pub fn join(&self, separator: &str) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(segment.as_str());
        }
        out
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join("."))
    }
}

impl FromIterator<Segment> for FieldPath {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldPath {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl From<&str> for FieldPath {
    fn from(key: &str) -> Self {
        Self::key(key)
    }
}

impl From<String> for FieldPath {
    fn from(key: String) -> Self {
        Self::key(key)
    }
}

impl From<Vec<Segment>> for FieldPath {
    fn from(segments: Vec<Segment>) -> Self {
        segments.into_iter().collect()
    }
}

impl PartialEq<[&str]> for FieldPath {
    fn eq(&self, other: &[&str]) -> bool {
        self.len() == other.len()
            && self
                .segments
                .iter()
                .zip(other)
                .all(|(segment, text)| segment.as_str() == *text)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for FieldPath {
    fn eq(&self, other: &[&str; N]) -> bool {
        self == other.as_slice()
    }
}

struct FieldPathVisitor;

impl<'de> Visitor<'de> for FieldPathVisitor {
    type Value = FieldPath;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a key string or a sequence of keys")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldPath, E> {
        Ok(FieldPath::key(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldPath, E> {
        Ok(FieldPath::key(Segment::Key(v.to_string())))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldPath, E> {
        Ok(FieldPath::key(Segment::Key(v.to_string())))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FieldPath, A::Error> {
        let mut path = FieldPath::new();
        while let Some(segment) = seq.next_element::<Segment>()? {
            path.push(segment);
        }
        Ok(path)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldPathVisitor)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for segment in &self.segments {
            seq.serialize_element(segment)?;
        }
        seq.end()
    }
}
