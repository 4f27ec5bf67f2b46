//! Sliding plaintext window driver
//!
//! Instead of a fixed crib list, every window of every plaintext source (for
//! each window length in a range) is tried as a crib against every
//! ciphertext. All per-scan hits are merged into one ranking by
//! `(score, offset)` and capped.

use crate::cancel::CancelFlag;
use crate::prune::Pruner;
use crate::scanner::{ScanParams, ScanResult, Scanner};
use crate::tableau::Tableau;
use crate::text::{LabeledText, Text};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

// ═══════════════════════════════════════════════════════════
// SLICE GENERATION
// ═══════════════════════════════════════════════════════════

/// Window length is the outer loop, start index the inner one.
#[derive(Debug, Clone)]
pub struct SliceWindows<'a> {
    text: &'a Text,
    window: usize,
    max_len: usize,
    start: usize,
}

/// All `(start, slice)` windows of `text` with length in `min_len..=max_len`.
/// Lengths longer than the text yield nothing; a zero length is skipped.
pub fn generate_slices(text: &Text, min_len: usize, max_len: usize) -> SliceWindows<'_> {
    SliceWindows {
        text,
        window: min_len.max(1),
        max_len,
        start: 0,
    }
}

impl SliceWindows<'_> {
    /// Number of windows the full enumeration yields.
    pub fn total(&self) -> usize {
        let n = self.text.len();
        (self.window..=self.max_len.min(n)).map(|w| n - w + 1).sum()
    }
}

impl Iterator for SliceWindows<'_> {
    type Item = (usize, Text);

    fn next(&mut self) -> Option<Self::Item> {
        while self.window <= self.max_len && self.window <= self.text.len() {
            if let Some(slice) = self.text.window(self.start, self.window) {
                let start = self.start;
                self.start += 1;
                return Some((start, slice));
            }
            self.window += 1;
            self.start = 0;
        }
        None
    }
}

// ═══════════════════════════════════════════════════════════
// AGGREGATION
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateParams {
    pub min_slice: usize,
    pub max_slice: usize,
    /// Per-slice scan settings (`top_n` is the per-slice cap)
    pub scan: ScanParams,
    /// Global cap on reported records
    pub limit: usize,
}

impl Default for AggregateParams {
    fn default() -> Self {
        Self {
            min_slice: 13,
            max_slice: 64,
            scan: ScanParams {
                max_pattern_len: 64,
                top_n: 50,
            },
            limit: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalRecord {
    #[serde(flatten)]
    pub result: ScanResult,
    pub cipher_label: String,
    pub plain_label: String,
    pub slice_start: usize,
    pub slice_text: Text,
}

impl GlobalRecord {
    pub fn rank_key(&self) -> (usize, usize) {
        self.result.rank_key()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub records: Vec<GlobalRecord>,
    /// Records merged before the cap
    pub candidates: usize,
    pub slices_scanned: usize,
    pub cancelled: bool,
}

/// Emitted after each slice has been scanned against every ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress<'a> {
    pub plain_label: &'a str,
    pub slice_start: usize,
    pub slice_len: usize,
    pub slices_done: usize,
    pub slices_total: usize,
    pub candidates: usize,
}

pub struct Aggregator<'a> {
    scanner: Scanner<'a>,
    params: AggregateParams,
}

impl<'a> Aggregator<'a> {
    pub fn new(tableau: &'a Tableau, pruner: &'a Pruner, params: AggregateParams) -> Self {
        Self {
            scanner: Scanner::new(tableau, pruner, params.scan),
            params,
        }
    }

    /// Slices the enumeration will produce over `plaintexts`.
    pub fn total_slices(&self, plaintexts: &[LabeledText]) -> usize {
        plaintexts
            .iter()
            .map(|p| generate_slices(&p.text, self.params.min_slice, self.params.max_slice).total())
            .sum()
    }

    pub fn run(
        &self,
        plaintexts: &[LabeledText],
        ciphers: &[LabeledText],
        cancel: &CancelFlag,
    ) -> AggregateReport {
        self.run_with_progress(plaintexts, ciphers, cancel, |_| {})
    }

    /// Source → slice → cipher. The flag is checked before every slice, so
    /// a slice is either scanned against all ciphers or not at all; on
    /// cancel the partial ranking is returned.
    pub fn run_with_progress<F>(
        &self,
        plaintexts: &[LabeledText],
        ciphers: &[LabeledText],
        cancel: &CancelFlag,
        mut on_progress: F,
    ) -> AggregateReport
    where
        F: FnMut(&Progress<'_>),
    {
        let slices_total = self.total_slices(plaintexts);
        info!(
            sources = plaintexts.len(),
            ciphers = ciphers.len(),
            slices = slices_total,
            min_slice = self.params.min_slice,
            max_slice = self.params.max_slice,
            limit = self.params.limit,
            "Starting slice aggregation"
        );

        let mut ranking = Ranking::new(self.params.limit);
        let mut slices_scanned = 0;
        let mut cancelled = false;

        'sources: for plain in plaintexts {
            debug!(source = %plain.label, len = plain.text.len(), "Processing plaintext source");

            for (slice_start, slice) in
                generate_slices(&plain.text, self.params.min_slice, self.params.max_slice)
            {
                if cancel.is_cancelled() {
                    cancelled = true;
                    break 'sources;
                }
                for cipher in ciphers {
                    for result in self.scanner.scan(&cipher.text, &slice) {
                        ranking.push(GlobalRecord {
                            result,
                            cipher_label: cipher.label.clone(),
                            plain_label: plain.label.clone(),
                            slice_start,
                            slice_text: slice.clone(),
                        });
                    }
                }

                slices_scanned += 1;
                on_progress(&Progress {
                    plain_label: &plain.label,
                    slice_start,
                    slice_len: slice.len(),
                    slices_done: slices_scanned,
                    slices_total,
                    candidates: ranking.candidates,
                });
            }
        }

        let candidates = ranking.candidates;
        let records = ranking.finish();

        if cancelled {
            warn!(slices = slices_scanned, candidates, "Slice aggregation cancelled");
        } else {
            info!(slices = slices_scanned, candidates, kept = records.len(), "Slice aggregation complete");
        }

        AggregateReport {
            records,
            candidates,
            slices_scanned,
            cancelled,
        }
    }
}

/// Bounded stable ranking. Compacting (stable sort then truncate) whenever
/// the buffer reaches twice the limit gives the same records, in the same
/// order, as one stable sort over everything followed by the cap.
struct Ranking {
    limit: usize,
    buffer: Vec<GlobalRecord>,
    candidates: usize,
}

impl Ranking {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            buffer: Vec::new(),
            candidates: 0,
        }
    }

    fn push(&mut self, record: GlobalRecord) {
        self.candidates += 1;
        self.buffer.push(record);
        if self.buffer.len() >= self.limit.saturating_mul(2).max(1024) {
            self.compact();
        }
    }

    fn compact(&mut self) {
        self.buffer.sort_by_key(GlobalRecord::rank_key);
        self.buffer.truncate(self.limit);
    }

    fn finish(mut self) -> Vec<GlobalRecord> {
        self.compact();
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Normalizer;

    const K1: &str = "EMUFPHZLRFAXYUSDJKZLDKRNSHGNFIVJYQTQUXQBQVYUVLLTREVJYQTMKYRDMFD";
    const K2_HEAD: &str = "VFPJUDEEHZWETZYVGWHKKQETGFQJNCEGGWHKK?DQMCPFQZDQMMIAGPFXHQRLG";

    fn entry(label: &str, raw: &str) -> LabeledText {
        LabeledText::normalized(label, raw, &Normalizer::default())
    }

    fn params(min: usize, max: usize, top_n: usize, limit: usize) -> AggregateParams {
        AggregateParams {
            min_slice: min,
            max_slice: max,
            scan: ScanParams {
                max_pattern_len: 64,
                top_n,
            },
            limit,
        }
    }

    #[test]
    fn test_generate_slices_order() {
        let text = Text::from_letters("ABCD").unwrap();
        let slices: Vec<_> = generate_slices(&text, 2, 3)
            .map(|(start, s)| (start, s.as_str().to_string()))
            .collect();
        assert_eq!(
            slices,
            [
                (0, "AB".to_string()),
                (1, "BC".to_string()),
                (2, "CD".to_string()),
                (0, "ABC".to_string()),
                (1, "BCD".to_string()),
            ]
        );
        assert_eq!(generate_slices(&text, 2, 3).total(), 5);
    }

    #[test]
    fn test_generate_slices_bounds() {
        let text = Text::from_letters("ABCD").unwrap();
        assert_eq!(generate_slices(&text, 5, 9).count(), 0);
        assert_eq!(generate_slices(&text, 5, 9).total(), 0);
        assert_eq!(generate_slices(&text, 3, 2).count(), 0);
        assert_eq!(generate_slices(&text, 0, 1).count(), 4);
        assert_eq!(generate_slices(&text, 3, 99).count(), 3);
    }

    #[test]
    fn test_generate_slices_restartable() {
        let text = Text::from_letters("KRYPTOS").unwrap();
        let slices = generate_slices(&text, 3, 5);
        let first: Vec<_> = slices.clone().collect();
        let second: Vec<_> = slices.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5 + 4 + 3);
    }

    #[test]
    fn test_finds_abscissa_from_plaintext() {
        let t = Tableau::from_keyword("KRYPTOS").unwrap();
        let pruner = Pruner::empty();
        let agg = Aggregator::new(&t, &pruner, params(13, 13, 5, 10));
        let plains = [entry("K2_plain", "ITWASTOTALLYINVISIBLEHOWS")];
        let ciphers = [entry("K1", K1), entry("K2", K2_HEAD)];

        let report = agg.run(&plains, &ciphers, &CancelFlag::new());
        assert!(!report.cancelled);
        assert_eq!(report.slices_scanned, 25 - 13 + 1);

        // the plaintext is K2's own, so every slice lines up with its start
        let best = &report.records[0];
        assert_eq!(best.result.pattern.as_str(), "ABSCISSA");
        assert_eq!(best.cipher_label, "K2");
        assert_eq!(best.plain_label, "K2_plain");
        assert_eq!(best.slice_text.as_str(), "ITWASTOTALLYI");
        assert_eq!(best.slice_start, 0);
        assert_eq!(best.result.offset, 0);

        let rotations: Vec<_> = report.records[..4]
            .iter()
            .map(|r| (r.slice_start, r.result.pattern.as_str()))
            .collect();
        assert_eq!(rotations, [(0, "ABSCISSA"), (1, "BSCISSAA"), (2, "SCISSAAB"), (3, "CISSAABS")]);
    }

    #[test]
    fn test_pruned_keyword_never_reported() {
        let t = Tableau::from_keyword("KRYPTOS").unwrap();
        let pruner = Pruner::new(["ABSCISSA"], &Normalizer::default());
        let agg = Aggregator::new(&t, &pruner, params(13, 14, 5, 100));
        let plains = [entry("K2_plain", "ITWASTOTALLYINVISIBLEHOWS")];
        let ciphers = [entry("K2", K2_HEAD)];

        let report = agg.run(&plains, &ciphers, &CancelFlag::new());
        assert!(!report.records.is_empty());
        assert!(report
            .records
            .iter()
            .all(|r| !pruner.should_prune(r.result.pattern.as_bytes())));
    }

    #[test]
    fn test_cap_keeps_lowest_records() {
        let t = Tableau::from_keyword("KRYPTOS").unwrap();
        let pruner = Pruner::empty();
        let plains = [entry("P", "BETWEENSUBTLESHADINGANDTHEABSENCEOFLIGHT")];
        let ciphers = [entry("K1", K1), entry("K2", K2_HEAD)];

        let full = Aggregator::new(&t, &pruner, params(6, 9, 10, usize::MAX))
            .run(&plains, &ciphers, &CancelFlag::new());
        let capped = Aggregator::new(&t, &pruner, params(6, 9, 10, 25))
            .run(&plains, &ciphers, &CancelFlag::new());

        assert!(full.records.len() > 25);
        assert_eq!(capped.candidates, full.candidates);
        assert_eq!(capped.records.len(), 25);
        assert_eq!(capped.records[..], full.records[..25]);

        let worst_kept = capped.records.last().unwrap().rank_key();
        assert!(full.records[25..].iter().all(|r| r.rank_key() >= worst_kept));
        assert!(capped.records.windows(2).all(|w| w[0].rank_key() <= w[1].rank_key()));
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        // constant plaintext against constant ciphertexts: every alignment
        // scores 1, so only enumeration order separates them
        let t = Tableau::standard();
        let pruner = Pruner::empty();
        let agg = Aggregator::new(&t, &pruner, params(2, 2, 10, 100));
        let plains = [entry("first", "AAA"), entry("second", "AAA")];
        let ciphers = [entry("X", "BBBB"), entry("Y", "CCCC")];

        let report = agg.run(&plains, &ciphers, &CancelFlag::new());
        let order: Vec<_> = report
            .records
            .iter()
            .filter(|r| r.result.offset == 0)
            .map(|r| (r.plain_label.as_str(), r.slice_start, r.cipher_label.as_str()))
            .collect();
        assert_eq!(
            order,
            [
                ("first", 0, "X"),
                ("first", 0, "Y"),
                ("first", 1, "X"),
                ("first", 1, "Y"),
                ("second", 0, "X"),
                ("second", 0, "Y"),
                ("second", 1, "X"),
                ("second", 1, "Y"),
            ]
        );
    }

    #[test]
    fn test_cancel_midway_keeps_partial_ranking() {
        let t = Tableau::from_keyword("KRYPTOS").unwrap();
        let pruner = Pruner::empty();
        let agg = Aggregator::new(&t, &pruner, params(5, 8, 5, 1000));
        let plains = [entry("P", "SLOWLYDESPARATLYSLOWLYTHEREMAINSOFPASSAGE")];
        let ciphers = [entry("K1", K1)];
        let cancel = CancelFlag::new();

        let report = agg.run_with_progress(&plains, &ciphers, &cancel, |p| {
            if p.slices_done == 10 {
                cancel.cancel();
            }
        });

        assert!(report.cancelled);
        assert_eq!(report.slices_scanned, 10);
        assert_eq!(report.candidates, 10 * 5);
        assert!(report.records.windows(2).all(|w| w[0].rank_key() <= w[1].rank_key()));
        assert!(report.records.iter().all(|r| r.result.key_run.len() == 5));
    }

    #[test]
    fn test_cancel_stops_on_slice_boundary() {
        let t = Tableau::from_keyword("KRYPTOS").unwrap();
        let pruner = Pruner::empty();
        let agg = Aggregator::new(&t, &pruner, params(5, 8, 3, 1000));
        let plains = [entry("P", "SLOWLYDESPARATLYSLOWLYTHEREMAINSOFPASSAGE")];
        let ciphers = [entry("K1", K1), entry("K2", K2_HEAD)];
        let cancel = CancelFlag::new();

        let report = agg.run_with_progress(&plains, &ciphers, &cancel, |p| {
            if p.slices_done == 7 {
                cancel.cancel();
            }
        });

        assert!(report.cancelled);
        assert_eq!(report.slices_scanned, 7);
        assert_eq!(report.candidates, 7 * 2 * 3);
        for cipher in ["K1", "K2"] {
            let hits = report.records.iter().filter(|r| r.cipher_label == cipher).count();
            assert_eq!(hits, 7 * 3, "{cipher}");
        }
    }

    #[test]
    fn test_progress_counts() {
        let t = Tableau::from_keyword("KRYPTOS").unwrap();
        let pruner = Pruner::empty();
        let agg = Aggregator::new(&t, &pruner, params(3, 4, 2, 10));
        let plains = [entry("A", "ABCDEF"), entry("B", "GHIJ")];
        let ciphers = [entry("C", "ZYXWVUTSRQ")];

        let expected_total = (4 + 3) + (2 + 1);
        assert_eq!(agg.total_slices(&plains), expected_total);

        let mut seen = Vec::new();
        let report = agg.run_with_progress(&plains, &ciphers, &CancelFlag::new(), |p| {
            assert_eq!(p.slices_total, expected_total);
            seen.push((p.plain_label.to_string(), p.slice_start, p.slice_len));
        });
        assert_eq!(report.slices_scanned, expected_total);
        assert_eq!(seen.len(), expected_total);
        assert_eq!(seen[0], ("A".to_string(), 0, 3));
        assert_eq!(seen[expected_total - 1], ("B".to_string(), 0, 4));
    }

    #[test]
    fn test_record_serializes_flat() {
        let t = Tableau::from_keyword("KRYPTOS").unwrap();
        let pruner = Pruner::empty();
        let agg = Aggregator::new(&t, &pruner, params(13, 13, 1, 1));
        let plains = [entry("K2_plain", "ALLYINVISIBLE")];
        let ciphers = [entry("K2", K2_HEAD)];
        let report = agg.run(&plains, &ciphers, &CancelFlag::new());

        let json = serde_json::to_value(&report.records[0]).unwrap();
        assert_eq!(json["pattern"], "ABSCISSA");
        assert_eq!(json["score"], 8);
        assert_eq!(json["offset"], 8);
        assert_eq!(json["cipher_label"], "K2");
        assert_eq!(json["slice_text"], "ALLYINVISIBLE");
    }
}
