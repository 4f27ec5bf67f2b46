//! Normalized Text
//!
//! Everything downstream of the normalizer works on `Text`: a string holding
//! only the uppercase symbols A-Z. Raw corpus text is turned into `Text` by
//! uppercasing, dropping anything that is not a letter and replacing the
//! placeholder for an illegible symbol with a fixed fallback letter.

use crate::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// Uppercase A-Z symbols only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Text(String);

impl Text {
    /// Strict constructor: every char must be an ASCII letter.
    pub fn from_letters(s: &str) -> Result<Self> {
        match s.chars().find(|c| !c.is_ascii_alphabetic()) {
            Some(bad) => Err(Error::InvalidSymbol(bad)),
            None => Ok(Self(s.to_ascii_uppercase())),
        }
    }

    /// Build from symbols already known to be A-Z.
    pub(crate) fn from_symbols(symbols: impl IntoIterator<Item = u8>) -> Self {
        Self(symbols.into_iter().map(char::from).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `len` symbols starting at `start`, or `None` past the end.
    pub fn window(&self, start: usize, len: usize) -> Option<Text> {
        let end = start.checked_add(len)?;
        self.0.get(start..end).map(|s| Text(s.to_string()))
    }

    /// First `len` symbols (clamped to the text length).
    pub fn prefix(&self, len: usize) -> Text {
        Text(self.0[..len.min(self.0.len())].to_string())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Raw text to `Text` conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    placeholder: char,
    fallback: u8,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            placeholder: '?',
            fallback: b'K',
        }
    }
}

impl Normalizer {
    /// `fallback` must be an ASCII letter; it is stored uppercased.
    pub fn new(placeholder: char, fallback: char) -> Result<Self> {
        if !fallback.is_ascii_alphabetic() {
            return Err(Error::InvalidSymbol(fallback));
        }
        Ok(Self {
            placeholder,
            fallback: fallback.to_ascii_uppercase() as u8,
        })
    }

    /// Never fails: unknown characters are dropped.
    pub fn normalize(&self, raw: &str) -> Text {
        Text::from_symbols(raw.chars().filter_map(|c| {
            if c == self.placeholder {
                Some(self.fallback)
            } else if c.is_ascii_alphabetic() {
                Some(c.to_ascii_uppercase() as u8)
            } else {
                None
            }
        }))
    }
}

/// A normalized corpus entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledText {
    pub label: String,
    pub text: Text,
}

impl LabeledText {
    pub fn new(label: impl Into<String>, text: Text) -> Self {
        Self {
            label: label.into(),
            text,
        }
    }

    /// Normalize `raw` with `normalizer` and attach `label`.
    pub fn normalized(label: impl Into<String>, raw: &str, normalizer: &Normalizer) -> Self {
        Self::new(label, normalizer.normalize(raw))
    }
}
