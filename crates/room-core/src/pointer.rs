//! JSON Pointer (RFC 6901)
//!
//! A parsed pointer into a `serde_json::Value` document. Patch operations
//! carry pointers in their wire form (`String`) and parse them on
//! application; see [`crate::patch`].

use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a JSON Pointer string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointerError {
    /// A non-empty pointer must start with `/`
    #[error("pointer must be empty or start with '/': {0:?}")]
    NotRooted(String),

    /// `~` must be followed by `0` or `1`
    #[error("invalid escape sequence in pointer: {0:?}")]
    InvalidEscape(String),
}

/// A parsed JSON Pointer
///
/// The empty pointer (`""`) addresses the whole document. Reference tokens
/// are stored unescaped (`~0` → `~`, `~1` → `/`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// The root pointer (`""`), addressing the whole document
    #[must_use]
    pub fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Parse a pointer from its string form
    pub fn parse(s: &str) -> Result<Self, PointerError> {
        if s.is_empty() {
            return Ok(Self::root());
        }
        if !s.starts_with('/') {
            return Err(PointerError::NotRooted(s.to_string()));
        }

        let mut tokens = Vec::new();
        for raw in s.split('/').skip(1) {
            tokens.push(unescape(raw).ok_or_else(|| PointerError::InvalidEscape(s.to_string()))?);
        }
        Ok(Self { tokens })
    }

    /// Whether this is the root pointer
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The unescaped reference tokens
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Split into (parent pointer, last token); `None` for the root
    #[must_use]
    pub fn split_last(&self) -> Option<(Self, &str)> {
        let (last, parents) = self.tokens.split_last()?;
        Some((
            Self {
                tokens: parents.to_vec(),
            },
            last.as_str(),
        ))
    }

    /// Whether this pointer addresses a strict ancestor of `other`
    #[must_use]
    pub fn is_proper_prefix_of(&self, other: &Self) -> bool {
        self.tokens.len() < other.tokens.len()
            && other.tokens[..self.tokens.len()] == self.tokens[..]
    }

    /// Resolve the pointer against a document
    ///
    /// Returns `None` if any token does not address an existing value.
    /// The array end marker (`-`) never resolves; it only has meaning for
    /// `add` operations.
    #[must_use]
    pub fn resolve<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        let mut current = doc;
        for token in &self.tokens {
            current = match current {
                Value::Object(map) => map.get(token)?,
                Value::Array(items) => items.get(parse_array_index(token)?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Mutable counterpart of [`resolve`](Self::resolve)
    #[must_use]
    pub fn resolve_mut<'a>(&self, doc: &'a mut Value) -> Option<&'a mut Value> {
        let mut current = doc;
        for token in &self.tokens {
            current = match current {
                Value::Object(map) => map.get_mut(token)?,
                Value::Array(items) => items.get_mut(parse_array_index(token)?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl FromStr for JsonPointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape(token))?;
        }
        Ok(())
    }
}

/// Parse a reference token as an array index
///
/// RFC 6901 indices are non-negative decimal integers without leading
/// zeros. Returns `None` for anything else (including `-`).
#[must_use]
pub(crate) fn parse_array_index(token: &str) -> Option<usize> {
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
