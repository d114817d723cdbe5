//! Byte pattern matching for replay buffers.
//!
//! Patterns are written as whitespace separated hex tokens, with `??` standing
//! for a byte whose value is not known (`"0F 09 ?? ?? 58 07"`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A byte sequence where some positions may be wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BytePattern {
    bytes: Vec<Option<u8>>,
}

impl BytePattern {
    /// Creates a pattern from explicit bytes, `None` marking a wildcard.
    pub fn new(bytes: Vec<Option<u8>>) -> Self {
        Self { bytes }
    }

    /// Creates a pattern with no wildcards.
    pub fn exact(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().map(Some).collect(),
        }
    }

    /// Parses a hex token pattern such as `"01 16 ?? 01"`.
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut bytes = Vec::new();
        for token in pattern.split_whitespace() {
            if token == "??" || token == "?" {
                bytes.push(None);
                continue;
            }

            let value = u8::from_str_radix(token, 16).map_err(|e| {
                Error::InvalidPattern(format!("Invalid pattern token '{}': {}", token, e))
            })?;
            bytes.push(Some(value));
        }

        if bytes.is_empty() {
            return Err(Error::InvalidPattern("Pattern is empty".to_string()));
        }

        Ok(Self { bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn has_wildcards(&self) -> bool {
        self.bytes.iter().any(Option::is_none)
    }

    /// Returns true if the pattern matches `buffer` starting at `offset`.
    pub fn matches_at(&self, buffer: &[u8], offset: usize) -> bool {
        let Some(window) = offset
            .checked_add(self.bytes.len())
            .and_then(|end| buffer.get(offset..end))
        else {
            return false;
        };

        window
            .iter()
            .zip(&self.bytes)
            .all(|(actual, expected)| expected.is_none_or(|b| b == *actual))
    }
}

impl TryFrom<String> for BytePattern {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<BytePattern> for String {
    fn from(pattern: BytePattern) -> Self {
        pattern.to_string()
    }
}

impl fmt::Display for BytePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens = self
            .bytes
            .iter()
            .map(|b| match b {
                Some(value) => format!("{:02X}", value),
                None => "??".to_string(),
            })
            .collect::<Vec<_>>();
        f.write_str(&tokens.join(" "))
    }
}

/// Find the first occurrence of an exact byte sequence.
///
/// # Example
///
/// ```
/// use wrpl_core::scan::locate;
///
/// let buffer = [9, 1, 2, 3, 1, 2, 3];
/// assert_eq!(locate(&buffer, &[1, 2, 3]), Some(1));
/// assert_eq!(locate(&buffer, &[4]), None);
/// ```
pub fn locate(buffer: &[u8], pattern: &[u8]) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > buffer.len() {
        return None;
    }

    buffer
        .windows(pattern.len())
        .position(|window| window == pattern)
}

/// Find the first match of a pattern that may contain wildcards.
pub fn locate_pattern(buffer: &[u8], pattern: &BytePattern) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > buffer.len() {
        return None;
    }

    (0..=buffer.len() - pattern.len()).find(|&i| pattern.matches_at(buffer, i))
}

/// Find every match of a pattern, in ascending offset order.
///
/// Overlapping matches are all reported.
///
/// # Example
///
/// ```
/// use wrpl_core::scan::{BytePattern, locate_all};
///
/// let buffer = [1, 2, 3, 1, 9, 3];
/// let pattern = BytePattern::parse("01 ?? 03").unwrap();
/// assert_eq!(locate_all(&buffer, &pattern), vec![0, 3]);
/// ```
pub fn locate_all(buffer: &[u8], pattern: &BytePattern) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > buffer.len() {
        return Vec::new();
    }

    (0..=buffer.len() - pattern.len())
        .filter(|&i| pattern.matches_at(buffer, i))
        .collect()
}
