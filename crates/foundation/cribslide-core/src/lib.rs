//! Cribslide Core: keyed-tableau crib sliding
//!
//! Aligns candidate plaintext fragments ("cribs") against ciphertexts under a
//! keyword-seeded Vigenère tableau, recovers the implied key run at every
//! offset and ranks alignments by the length of its minimal repeating pattern.
//!
//! # Modules
//! - `text` - Normalization of raw corpus text into A-Z symbols
//! - `tableau` - Keyed alphabet and key/plain/cipher arithmetic
//! - `period` - Minimal period detection
//! - `prune` - Known-keyword pruning (exact, rotation, anagram)
//! - `scanner` - Per-offset scan of one crib against one ciphertext
//! - `sweep` - Fixed crib list driver
//! - `aggregate` - Sliding plaintext window driver with a global ranking
//! - `row` - Per-symbol arithmetic of a single alignment
//! - `cancel` - Cooperative cancellation for the drivers

pub mod text;
pub mod tableau;
pub mod period;
pub mod prune;
pub mod scanner;
pub mod sweep;
pub mod aggregate;
pub mod row;
pub mod cancel;

pub use text::{LabeledText, Normalizer, Text};
pub use tableau::{Tableau, ALPHABET};
pub use period::{is_period, minimal_period};
pub use prune::Pruner;
pub use scanner::{ScanParams, ScanResult, Scanner};
pub use sweep::{sweep, SweepReport, SweepSection};
pub use aggregate::{generate_slices, AggregateParams, AggregateReport, Aggregator, GlobalRecord, Progress};
pub use row::{compute_row, match_count, RowCell};
pub use cancel::CancelFlag;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid keyword {0:?}: must be non-empty ASCII letters")]
    InvalidKeyword(String),

    #[error("Invalid symbol {0:?}: expected an ASCII letter")]
    InvalidSymbol(char),

    #[error("Offset {offset} out of range: crib of length {crib_len} does not fit ciphertext of length {cipher_len}")]
    OffsetOutOfRange {
        offset: usize,
        crib_len: usize,
        cipher_len: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
