//! Slice/Offset Scanner
//!
//! Slides one crib across one ciphertext. At every offset the crib-length
//! segment gives a key run, the key run gives a pattern (its minimal period
//! prefix), and the pattern length is the score. Lower is better: a short
//! exact period is the strongest periodicity signal, and among equal scores
//! the earliest offset wins.

use crate::period::minimal_period;
use crate::prune::Pruner;
use crate::tableau::Tableau;
use crate::text::Text;
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanParams {
    /// Largest period searched
    pub max_pattern_len: usize,
    /// Results kept per scan
    pub top_n: usize,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            max_pattern_len: 12,
            top_n: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub offset: usize,
    pub pattern: Text,
    pub key_run: Text,
    pub score: usize,
}

impl ScanResult {
    /// Ordering key: `(score, offset)`.
    pub fn rank_key(&self) -> (usize, usize) {
        (self.score, self.offset)
    }

    /// Whether the key run repeats within the search bound.
    pub fn is_periodic(&self) -> bool {
        self.score < self.key_run.len()
    }
}

pub struct Scanner<'a> {
    tableau: &'a Tableau,
    pruner: &'a Pruner,
    params: ScanParams,
}

impl<'a> Scanner<'a> {
    pub fn new(tableau: &'a Tableau, pruner: &'a Pruner, params: ScanParams) -> Self {
        Self {
            tableau,
            pruner,
            params,
        }
    }

    pub fn params(&self) -> ScanParams {
        self.params
    }

    /// Valid offsets; empty when the crib is empty or longer than the cipher.
    pub fn offsets(cipher: &Text, crib: &Text) -> Range<usize> {
        if crib.is_empty() {
            return 0..0;
        }
        0..(cipher.len() + 1).saturating_sub(crib.len())
    }

    /// One alignment. `None` when the offset is out of range or the pattern
    /// is pruned.
    pub fn evaluate(&self, cipher: &Text, crib: &Text, offset: usize) -> Option<ScanResult> {
        if crib.is_empty() {
            return None;
        }
        let segment = cipher.window(offset, crib.len())?;
        let key_run = self.tableau.key_run(crib, &segment);
        let period = minimal_period(key_run.as_bytes(), self.params.max_pattern_len);
        let pattern = key_run.prefix(period);

        if self.pruner.should_prune(pattern.as_bytes()) {
            return None;
        }

        Some(ScanResult {
            offset,
            pattern,
            key_run,
            score: period,
        })
    }

    /// Every surviving offset, sorted by `(score, offset)`, untruncated.
    pub fn scan_all(&self, cipher: &Text, crib: &Text) -> Vec<ScanResult> {
        let mut results: Vec<ScanResult> = Self::offsets(cipher, crib)
            .filter_map(|offset| self.evaluate(cipher, crib, offset))
            .collect();
        results.sort_by_key(ScanResult::rank_key);
        results
    }

    /// Top `top_n` of `scan_all`.
    pub fn scan(&self, cipher: &Text, crib: &Text) -> Vec<ScanResult> {
        let mut results = self.scan_all(cipher, crib);
        results.truncate(self.params.top_n);
        results
    }
}
