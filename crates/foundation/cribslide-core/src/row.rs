//! Row inspection
//!
//! The full arithmetic of one alignment, symbol by symbol, for display next
//! to an expected key pattern.

use crate::tableau::Tableau;
use crate::text::Text;
use crate::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowCell {
    pub cipher_symbol: char,
    pub cipher_index: usize,
    pub plain_symbol: char,
    pub plain_index: usize,
    /// `(cipher_index - plain_index) mod 26`
    pub delta: usize,
    /// Rank of `key_symbol`; always equal to `delta`
    pub key_index: usize,
    pub key_symbol: char,
    pub expected_symbol: Option<char>,
    pub matches_expected: Option<bool>,
}

/// One cell per crib symbol at `offset`. `expected` is cycled across the
/// row; an empty pattern counts as none.
pub fn compute_row(
    tableau: &Tableau,
    crib: &Text,
    cipher: &Text,
    offset: usize,
    expected: Option<&Text>,
) -> Result<Vec<RowCell>> {
    let segment = cipher
        .window(offset, crib.len())
        .ok_or(Error::OffsetOutOfRange {
            offset,
            crib_len: crib.len(),
            cipher_len: cipher.len(),
        })?;

    let expected = expected.filter(|e| !e.is_empty()).map(Text::as_bytes);

    let cells = crib
        .as_bytes()
        .iter()
        .zip(segment.as_bytes())
        .enumerate()
        .map(|(i, (&plain, &cipher))| {
            let key = tableau.key_symbol(plain, cipher);
            let expected_symbol = expected.map(|e| e[i % e.len()]);
            RowCell {
                cipher_symbol: char::from(cipher),
                cipher_index: tableau.index(cipher),
                plain_symbol: char::from(plain),
                plain_index: tableau.index(plain),
                delta: tableau.delta(plain, cipher),
                key_index: tableau.index(key),
                key_symbol: char::from(key),
                expected_symbol: expected_symbol.map(char::from),
                matches_expected: expected_symbol.map(|e| e == key),
            }
        })
        .collect();

    Ok(cells)
}

/// Cells whose key symbol matches the expected pattern.
pub fn match_count(cells: &[RowCell]) -> usize {
    cells.iter().filter(|c| c.matches_expected == Some(true)).count()
}
