//! Cribslide Config
//!
//! Settings for the tableau, the pruner and both drivers, plus the corpus.
//! Values come from `~/.config/cribslide/config.yaml` (or an explicit path),
//! and anything not given falls back to the defaults of the original Kryptos
//! workflow.
//!
//! # Modules
//! - `corpus` - Ciphertext / crib / plaintext entries and their resolution
//! - `kryptos` - Built-in Kryptos fixtures

pub mod corpus;
pub mod kryptos;

pub use corpus::{Corpus, CorpusConfig, CorpusEntry};

use cribslide_core::{AggregateParams, Normalizer, Pruner, ScanParams, Tableau};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Unknown {kind} label: {label}")]
    UnknownLabel { kind: &'static str, label: String },

    #[error(transparent)]
    Core(#[from] cribslide_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fixed crib list settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    pub max_pattern_len: usize,
    pub top_n: usize,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            max_pattern_len: 12,
            top_n: 15,
        }
    }
}

/// Sliding window settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideSettings {
    pub min_slice: usize,
    pub max_slice: usize,
    pub max_pattern_len: usize,
    pub top_per_slice: usize,
    pub limit: usize,
}

impl Default for SlideSettings {
    fn default() -> Self {
        Self {
            min_slice: 13,
            max_slice: 64,
            max_pattern_len: 64,
            top_per_slice: 50,
            limit: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    /// Keyword seeding the tableau
    pub primary_key: String,
    /// Marks an illegible ciphertext symbol
    pub placeholder: char,
    /// Letter substituted for the placeholder
    pub fallback: char,
    /// Keywords already recovered
    pub prune: Vec<String>,
    pub sweep: SweepSettings,
    pub slide: SlideSettings,
    pub corpus: CorpusConfig,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            primary_key: kryptos::PRIMARY_KEY.to_string(),
            placeholder: '?',
            fallback: 'K',
            prune: kryptos::PRUNE.iter().map(|s| s.to_string()).collect(),
            sweep: SweepSettings::default(),
            slide: SlideSettings::default(),
            corpus: CorpusConfig::default(),
        }
    }
}

impl SlideConfig {
    /// `~/.config/cribslide/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cribslide").join("config.yaml"))
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = parse_file(path)?;
        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Explicit path if given (must exist), else the default path if it
    /// exists, else built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                tracing::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.tableau()?;
        let normalizer = self.normalizer()?;

        let sweep = &self.sweep;
        if sweep.max_pattern_len == 0 {
            return Err(invalid("sweep.max_pattern_len must be at least 1"));
        }
        if sweep.top_n == 0 {
            return Err(invalid("sweep.top_n must be at least 1"));
        }

        let slide = &self.slide;
        if slide.min_slice == 0 {
            return Err(invalid("slide.min_slice must be at least 1"));
        }
        if slide.min_slice > slide.max_slice {
            return Err(invalid(format!(
                "slide.min_slice ({}) exceeds slide.max_slice ({})",
                slide.min_slice, slide.max_slice
            )));
        }
        if slide.max_pattern_len == 0 {
            return Err(invalid("slide.max_pattern_len must be at least 1"));
        }
        if slide.top_per_slice == 0 {
            return Err(invalid("slide.top_per_slice must be at least 1"));
        }
        if slide.limit == 0 {
            return Err(invalid("slide.limit must be at least 1"));
        }

        self.corpus.resolve(&normalizer)?;
        Ok(())
    }

    pub fn normalizer(&self) -> Result<Normalizer> {
        Ok(Normalizer::new(self.placeholder, self.fallback)?)
    }

    pub fn tableau(&self) -> Result<Tableau> {
        Ok(Tableau::from_keyword(&self.primary_key)?)
    }

    pub fn pruner(&self) -> Result<Pruner> {
        Ok(Pruner::new(&self.prune, &self.normalizer()?))
    }

    pub fn corpus(&self) -> Result<Corpus> {
        self.corpus.resolve(&self.normalizer()?)
    }

    pub fn sweep_params(&self) -> ScanParams {
        ScanParams {
            max_pattern_len: self.sweep.max_pattern_len,
            top_n: self.sweep.top_n,
        }
    }

    pub fn aggregate_params(&self) -> AggregateParams {
        AggregateParams {
            min_slice: self.slide.min_slice,
            max_slice: self.slide.max_slice,
            scan: ScanParams {
                max_pattern_len: self.slide.max_pattern_len,
                top_n: self.slide.top_per_slice,
            },
            limit: self.slide.limit,
        }
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::Invalid(msg.into())
}

/// `.json` via serde_json, anything else via serde_yaml.
pub(crate) fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        let config = SlideConfig::default();
        config.validate().unwrap();
        assert_eq!(config.tableau().unwrap().alphabet_string(), "KRYPTOSABCDEFGHIJLMNQUVWXZ");
        assert_eq!(config.pruner().unwrap().keywords().len(), 2);
        assert_eq!(config.sweep_params(), ScanParams { max_pattern_len: 12, top_n: 15 });
        assert_eq!(config.aggregate_params(), AggregateParams::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = SlideConfig::from_yaml_str(
            r#"
primary_key: palimpsest
slide:
  min_slice: 7
  max_slice: 17
  top_per_slice: 10
"#,
        )
        .unwrap();
        assert_eq!(config.primary_key, "palimpsest");
        assert_eq!(config.slide.min_slice, 7);
        assert_eq!(config.slide.max_slice, 17);
        assert_eq!(config.slide.top_per_slice, 10);
        assert_eq!(config.slide.limit, 3000);
        assert_eq!(config.sweep, SweepSettings::default());
        assert_eq!(config.prune, ["ABSCISSA", "PALIMPSEST"]);
    }

    #[test]
    fn test_json_config() {
        let config = SlideConfig::from_json_str(r#"{"prune": [], "sweep": {"top_n": 3}}"#).unwrap();
        assert!(config.pruner().unwrap().is_empty());
        assert_eq!(config.sweep_params().top_n, 3);
        assert_eq!(config.sweep_params().max_pattern_len, 12);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            "primary_key: KRYPTOS2",
            "primary_key: ''",
            "fallback: '7'",
            "sweep: { max_pattern_len: 0 }",
            "sweep: { top_n: 0 }",
            "slide: { min_slice: 0 }",
            "slide: { min_slice: 20, max_slice: 10 }",
            "slide: { max_pattern_len: 0 }",
            "slide: { top_per_slice: 0 }",
            "slide: { limit: 0 }",
            "corpus: { cribs: ['...'] }",
        ];
        for yaml in cases {
            let err = SlideConfig::from_yaml_str(yaml).unwrap_err();
            assert!(
                matches!(err, Error::Invalid(_) | Error::Core(_)),
                "{yaml}: {err}"
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "primary_key: KRYPTOS\ncorpus:\n  ciphertexts:\n    - {{ label: X, text: 'OBKR UOXO' }}"
        )
        .unwrap();

        let config = SlideConfig::load(file.path()).unwrap();
        let corpus = config.corpus().unwrap();
        assert_eq!(corpus.ciphertexts.len(), 1);
        assert_eq!(corpus.ciphertexts[0].text.as_str(), "OBKRUOXO");
        assert_eq!(corpus.cribs.len(), 8);
    }

    #[test]
    fn test_load_json_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"slide": {{"limit": 10}}}}"#).unwrap();
        let config = SlideConfig::load(file.path()).unwrap();
        assert_eq!(config.slide.limit, 10);
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            SlideConfig::load_or_default(Some(&missing)),
            Err(Error::IoError(_))
        ));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SlideConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(SlideConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
