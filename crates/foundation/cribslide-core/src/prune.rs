//! Known-keyword pruning
//!
//! Once part of the key has been recovered, rediscovering it (or a rotation
//! or reordering of it) at other alignments only clutters the rankings. A
//! `Pruner` holds those keywords and rejects any same-length pattern that
//! matches one exactly, as a cyclic rotation, or as an anagram.

use crate::text::{Normalizer, Text};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pruner {
    keywords: Vec<Text>,
}

impl Pruner {
    /// Keywords are normalized; entries that normalize to nothing are dropped.
    pub fn new<I, S>(keywords: I, normalizer: &Normalizer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|kw| normalizer.normalize(kw.as_ref()))
            .filter(|kw| !kw.is_empty())
            .collect();
        Self { keywords }
    }

    /// Never prunes.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn keywords(&self) -> &[Text] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn should_prune(&self, pattern: &[u8]) -> bool {
        self.matching_keyword(pattern).is_some()
    }

    /// First keyword the pattern matches, if any.
    pub fn matching_keyword(&self, pattern: &[u8]) -> Option<&Text> {
        self.keywords.iter().find(|kw| {
            let kw = kw.as_bytes();
            kw.len() == pattern.len()
                && (kw == pattern || is_rotation(pattern, kw) || is_anagram(pattern, kw))
        })
    }
}

/// `a` is a rotation of `b` (a contiguous window of `b + b`).
pub fn is_rotation(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }
    let doubled = [b, b].concat();
    doubled.windows(a.len()).any(|w| w == a)
}

/// Same multiset of symbols.
pub fn is_anagram(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut counts = [0i32; 256];
    for &x in a {
        counts[x as usize] += 1;
    }
    for &x in b {
        counts[x as usize] -= 1;
    }
    counts.iter().all(|&n| n == 0)
}
