//! Bounded cache of compiled patterns
//!
//! Schemas are usually parsed on every call, so the same `regex` argument
//! is compiled over and over. The cache keeps compiled [`Regex`] values by
//! source pattern, behind a `parking_lot` mutex.
//!
//! Patterns may be written with PCRE delimiters (`/^\w+$/i`); see
//! [`translate_pattern`].

use crate::error::LibraryError;
use parking_lot::Mutex;
use regex::Regex;
use std::collections::HashMap;

/// Maximum number of cached patterns (simple eviction)
pub const MAX_REGEX_CACHE_SIZE: usize = 256;

/// Maximum accepted pattern length
pub const MAX_REGEX_PATTERN_LEN: usize = 1000;

const DELIMITERS: &str = "/#~!@%|+";
const FLAGS: &str = "imsxuU";

/// Thread-safe pattern cache.
#[derive(Debug)]
pub struct RegexCache {
    patterns: Mutex<HashMap<String, Regex>>,
    capacity: usize,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::with_capacity(MAX_REGEX_CACHE_SIZE)
    }

    /// A cache holding at most `capacity` patterns (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            patterns: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Returns the compiled form of `pattern`, compiling on a miss.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Regex, LibraryError> {
        let mut cache = self.patterns.lock();
        if let Some(cached) = cache.get(pattern) {
            // Regex is Arc-backed; cloning is cheap
            return Ok(cached.clone());
        }

        let compiled = compile(pattern)?;

        if cache.len() >= self.capacity {
            if let Some(key) = cache.keys().next().cloned() {
                cache.remove(&key);
            }
        }
        cache.insert(pattern.to_owned(), compiled.clone());
        Ok(compiled)
    }

    pub fn len(&self) -> usize {
        self.patterns.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.lock().is_empty()
    }

    pub fn clear(&self) {
        self.patterns.lock().clear();
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiles `pattern` without caching.
pub fn compile(pattern: &str) -> Result<Regex, LibraryError> {
    if pattern.len() > MAX_REGEX_PATTERN_LEN {
        return Err(LibraryError::invalid_argument(
            "regex",
            0,
            format!(
                "pattern too long: {} chars (max {MAX_REGEX_PATTERN_LEN})",
                pattern.len()
            ),
        ));
    }
    Regex::new(&translate_pattern(pattern)).map_err(|source| LibraryError::InvalidPattern {
        pattern: pattern.to_owned(),
        source,
    })
}

/// Rewrites a delimited pattern (`/body/flags`) into `regex` syntax.
///
/// `i m s x U` become an inline flag group. Without the `u` flag the Perl
/// classes `\w \d \s` (and their negations) and `\b` are narrowed to
/// ASCII, as PCRE does; with `u` the body is kept verbatim. Anything that
/// is not a well-formed delimited pattern is returned unchanged.
///
/// ```
/// use treecheck_predicate::regex_cache::translate_pattern;
///
/// assert_eq!(translate_pattern(r"/^[\w_.-]+$/i"), r"(?i)^[[:word:]_.-]+$");
/// assert_eq!(translate_pattern(r"/^[\w_.-]+$/iu"), r"(?i)^[\w_.-]+$");
/// assert_eq!(translate_pattern("#^a+$#"), "^a+$");
/// assert_eq!(translate_pattern("^a+$"), "^a+$");
/// ```
pub fn translate_pattern(pattern: &str) -> String {
    let mut chars = pattern.chars();
    let Some(open) = chars.next() else {
        return String::new();
    };
    if !DELIMITERS.contains(open) {
        return pattern.to_owned();
    }
    let rest = chars.as_str();
    let Some(close) = rest.rfind(open) else {
        return pattern.to_owned();
    };
    let (body, flags) = (&rest[..close], &rest[close + open.len_utf8()..]);
    if !flags.chars().all(|c| FLAGS.contains(c)) {
        return pattern.to_owned();
    }

    let body = if flags.contains('u') {
        body.to_owned()
    } else {
        ascii_perl_classes(body)
    };
    let inline: String = flags.chars().filter(|&c| c != 'u').collect();
    if inline.is_empty() {
        body
    } else {
        format!("(?{inline}){body}")
    }
}

/// Replaces `\w \d \s \W \D \S` with POSIX classes and `\b` with its
/// ASCII form. Bracket expressions get bare `[:name:]` items.
fn ascii_perl_classes(body: &str) -> String {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len() + 16);
    let mut in_class = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' if i + 1 < chars.len() => {
                let escaped = chars[i + 1];
                match (posix_class(escaped), in_class) {
                    (Some(name), true) => {
                        out.push_str("[:");
                        out.push_str(name);
                        out.push_str(":]");
                    }
                    (Some(name), false) => {
                        out.push_str("[[:");
                        out.push_str(name);
                        out.push_str(":]]");
                    }
                    (None, false) if escaped == 'b' => out.push_str(r"(?-u:\b)"),
                    _ => {
                        out.push(c);
                        out.push(escaped);
                    }
                }
                i += 2;
                continue;
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
                i += 1;
                // `^` and a leading `]` are part of the opening
                if chars.get(i) == Some(&'^') {
                    out.push('^');
                    i += 1;
                }
                if chars.get(i) == Some(&']') {
                    out.push(']');
                    i += 1;
                }
                continue;
            }
            '[' if chars.get(i + 1) == Some(&':') => {
                if let Some(end) = find_posix_end(&chars, i + 2) {
                    out.extend(&chars[i..end]);
                    i = end;
                    continue;
                }
            }
            ']' if in_class => in_class = false,
            _ => {}
        }
        out.push(c);
        i += 1;
    }
    out
}

/// Index just past the `:]` closing a POSIX class item.
fn find_posix_end(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1))
        .find(|&j| chars[j] == ':' && chars[j + 1] == ']')
        .map(|j| j + 2)
}

fn posix_class(escaped: char) -> Option<&'static str> {
    let name = match escaped {
        'w' => "word",
        'W' => "^word",
        'd' => "digit",
        'D' => "^digit",
        's' => "space",
        'S' => "^space",
        _ => return None,
    };
    Some(name)
}
