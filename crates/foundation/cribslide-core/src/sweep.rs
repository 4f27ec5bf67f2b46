//! Fixed crib list driver
//!
//! Every crib against every ciphertext, keeping the scanner's top results
//! for each pair.

use crate::cancel::CancelFlag;
use crate::scanner::{ScanResult, Scanner};
use crate::text::{LabeledText, Text};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepSection {
    pub cipher_label: String,
    pub crib_label: String,
    pub crib: Text,
    pub results: Vec<ScanResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub sections: Vec<SweepSection>,
    pub cancelled: bool,
}

impl SweepReport {
    /// Best result over all sections, by `(score, offset)`; ties keep
    /// section order.
    pub fn best(&self) -> Option<(&SweepSection, &ScanResult)> {
        self.sections
            .iter()
            .filter_map(|s| s.results.first().map(|r| (s, r)))
            .min_by_key(|(_, r)| r.rank_key())
    }

    pub fn total_results(&self) -> usize {
        self.sections.iter().map(|s| s.results.len()).sum()
    }
}

/// Cipher order is outer, crib order inner. The flag is checked before each
/// pair; a cancelled sweep returns the sections finished so far.
pub fn sweep(
    scanner: &Scanner<'_>,
    ciphers: &[LabeledText],
    cribs: &[LabeledText],
    cancel: &CancelFlag,
) -> SweepReport {
    info!(
        ciphers = ciphers.len(),
        cribs = cribs.len(),
        max_pattern_len = scanner.params().max_pattern_len,
        top_n = scanner.params().top_n,
        "Starting crib sweep"
    );

    let mut report = SweepReport::default();

    'outer: for cipher in ciphers {
        for crib in cribs {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break 'outer;
            }

            let results = scanner.scan(&cipher.text, &crib.text);
            debug!(
                cipher = %cipher.label,
                crib = %crib.label,
                hits = results.len(),
                best = results.first().map(|r| r.score),
                "Scanned pair"
            );

            report.sections.push(SweepSection {
                cipher_label: cipher.label.clone(),
                crib_label: crib.label.clone(),
                crib: crib.text.clone(),
                results,
            });
        }
    }

    if report.cancelled {
        warn!(sections = report.sections.len(), "Crib sweep cancelled");
    } else {
        info!(sections = report.sections.len(), "Crib sweep complete");
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prune::Pruner;
    use crate::scanner::ScanParams;
    use crate::tableau::Tableau;
    use crate::text::Normalizer;

    fn corpus(entries: &[(&str, &str)]) -> Vec<LabeledText> {
        let n = Normalizer::default();
        entries
            .iter()
            .map(|(label, raw)| LabeledText::normalized(*label, raw, &n))
            .collect()
    }

    #[test]
    fn test_sections_follow_corpus_order() {
        let t = Tableau::from_keyword("KRYPTOS").unwrap();
        let pruner = Pruner::empty();
        let scanner = Scanner::new(&t, &pruner, ScanParams::default());
        let ciphers = corpus(&[
            ("K1", "EMUFPHZLRFAXYUSDJKZLDKRNSHGNFIVJYQTQUXQBQVYUVLLTREVJYQTMKYRDMFD"),
            ("K2", "VFPJUDEEHZWETZYVGWHKKQETGFQJNCEGGWHKK?DQMCPFQZDQMMIAGPFXHQRLG"),
        ]);
        let cribs = corpus(&[("room", "THEROOMWITHIN"), ("invisible", "ALLYINVISIBLE")]);

        let report = sweep(&scanner, &ciphers, &cribs, &CancelFlag::new());
        assert!(!report.cancelled);
        let order: Vec<_> = report
            .sections
            .iter()
            .map(|s| (s.cipher_label.as_str(), s.crib_label.as_str()))
            .collect();
        assert_eq!(
            order,
            [("K1", "room"), ("K1", "invisible"), ("K2", "room"), ("K2", "invisible")]
        );
        assert!(report.sections.iter().all(|s| s.results.len() <= 15));

        let (section, best) = report.best().unwrap();
        assert_eq!(section.cipher_label, "K2");
        assert_eq!(best.pattern.as_str(), "ABSCISSA");
    }

    #[test]
    fn test_cancelled_before_start() {
        let t = Tableau::from_keyword("KRYPTOS").unwrap();
        let pruner = Pruner::empty();
        let scanner = Scanner::new(&t, &pruner, ScanParams::default());
        let ciphers = corpus(&[("C", "ABCDEFGHIJKLMNOP")]);
        let cribs = corpus(&[("c", "ABC")]);

        let cancel = CancelFlag::new();
        cancel.cancel();
        let report = sweep(&scanner, &ciphers, &cribs, &cancel);
        assert!(report.cancelled);
        assert!(report.sections.is_empty());
        assert_eq!(report.total_results(), 0);
        assert!(report.best().is_none());
    }
}
