//! Corpus configuration
//!
//! Ciphertexts, cribs and plaintext sources as ordered `label → text`
//! entries. Order matters: it is the enumeration order of the drivers and so
//! the tie-break order of the rankings.

use crate::{kryptos, parse_file, Error, Result};
use cribslide_core::{LabeledText, Normalizer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Either `{label, text}` or a bare string that is its own label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorpusEntry {
    Labeled { label: String, text: String },
    Bare(String),
}

impl CorpusEntry {
    pub fn labeled(label: impl Into<String>, text: impl Into<String>) -> Self {
        CorpusEntry::Labeled {
            label: label.into(),
            text: text.into(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CorpusEntry::Labeled { label, .. } => label,
            CorpusEntry::Bare(text) => text.trim(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            CorpusEntry::Labeled { text, .. } => text,
            CorpusEntry::Bare(text) => text,
        }
    }
}

/// Sections left as `None` use the built-in Kryptos corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ciphertexts: Option<Vec<CorpusEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cribs: Option<Vec<CorpusEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plaintexts: Option<Vec<CorpusEntry>>,
}

impl CorpusConfig {
    /// Load a standalone corpus file (`.json` or YAML).
    pub fn load(path: &Path) -> Result<Self> {
        let corpus: Self = parse_file(path)?;
        tracing::info!(
            "Loaded corpus from {}: {} ciphertexts, {} cribs, {} plaintexts",
            path.display(),
            corpus.ciphertexts.as_ref().map_or(0, Vec::len),
            corpus.cribs.as_ref().map_or(0, Vec::len),
            corpus.plaintexts.as_ref().map_or(0, Vec::len),
        );
        Ok(corpus)
    }

    /// Sections present in `other` replace ours.
    pub fn overlay(self, other: CorpusConfig) -> CorpusConfig {
        CorpusConfig {
            ciphertexts: other.ciphertexts.or(self.ciphertexts),
            cribs: other.cribs.or(self.cribs),
            plaintexts: other.plaintexts.or(self.plaintexts),
        }
    }

    /// Normalize every entry, filling missing sections from the fixtures.
    pub fn resolve(&self, normalizer: &Normalizer) -> Result<Corpus> {
        let ciphertexts = match &self.ciphertexts {
            Some(entries) => resolve_section("ciphertexts", entries, normalizer)?,
            None => fixture(kryptos::CIPHERTEXTS, normalizer),
        };
        let cribs = match &self.cribs {
            Some(entries) => resolve_section("cribs", entries, normalizer)?,
            None => kryptos::CRIBS
                .iter()
                .map(|c| LabeledText::normalized(*c, c, normalizer))
                .collect(),
        };
        let plaintexts = match &self.plaintexts {
            Some(entries) => resolve_section("plaintexts", entries, normalizer)?,
            None => fixture(kryptos::PLAINTEXTS, normalizer),
        };

        Ok(Corpus {
            ciphertexts,
            cribs,
            plaintexts,
        })
    }
}

fn fixture(entries: &[(&str, &str)], normalizer: &Normalizer) -> Vec<LabeledText> {
    entries
        .iter()
        .map(|(label, raw)| LabeledText::normalized(*label, raw, normalizer))
        .collect()
}

fn resolve_section(
    section: &str,
    entries: &[CorpusEntry],
    normalizer: &Normalizer,
) -> Result<Vec<LabeledText>> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|entry| {
            let label = entry.label();
            // lookups ignore case, so labels must be unique ignoring case
            if !seen.insert(label.to_ascii_uppercase()) {
                return Err(Error::Invalid(format!("{section}: duplicate label '{label}'")));
            }
            let text = normalizer.normalize(entry.text());
            if text.is_empty() {
                return Err(Error::Invalid(format!(
                    "{section}: entry '{label}' has no letters after normalization"
                )));
            }
            Ok(LabeledText::new(label, text))
        })
        .collect()
}

/// Normalized corpus, ready for the drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Corpus {
    pub ciphertexts: Vec<LabeledText>,
    pub cribs: Vec<LabeledText>,
    pub plaintexts: Vec<LabeledText>,
}

impl Corpus {
    pub fn kryptos(normalizer: &Normalizer) -> Self {
        // fixtures always resolve
        Corpus {
            ciphertexts: fixture(kryptos::CIPHERTEXTS, normalizer),
            cribs: kryptos::CRIBS
                .iter()
                .map(|c| LabeledText::normalized(*c, c, normalizer))
                .collect(),
            plaintexts: fixture(kryptos::PLAINTEXTS, normalizer),
        }
    }

    pub fn cipher(&self, label: &str) -> Option<&LabeledText> {
        find(&self.ciphertexts, label)
    }

    pub fn plaintext(&self, label: &str) -> Option<&LabeledText> {
        find(&self.plaintexts, label)
    }

    /// Ciphertexts by label, in the order given; all of them when `labels`
    /// is empty.
    pub fn select_ciphers(&self, labels: &[String]) -> Result<Vec<LabeledText>> {
        select("ciphertext", &self.ciphertexts, labels)
    }

    pub fn select_plaintexts(&self, labels: &[String]) -> Result<Vec<LabeledText>> {
        select("plaintext", &self.plaintexts, labels)
    }
}

fn find<'a>(entries: &'a [LabeledText], label: &str) -> Option<&'a LabeledText> {
    entries.iter().find(|e| e.label.eq_ignore_ascii_case(label))
}

fn select(kind: &'static str, entries: &[LabeledText], labels: &[String]) -> Result<Vec<LabeledText>> {
    if labels.is_empty() {
        return Ok(entries.to_vec());
    }
    labels
        .iter()
        .map(|label| {
            find(entries, label).cloned().ok_or_else(|| Error::UnknownLabel {
                kind,
                label: label.clone(),
            })
        })
        .collect()
}
