//! Keyed Tableau
//!
//! A 26-symbol alphabet seeded by a primary keyword, with the rank of each
//! symbol. All key/plain/cipher arithmetic is done on ranks mod 26.

use crate::text::Text;
use crate::{Error, Result};

pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const SIZE: usize = 26;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tableau {
    keyword: String,
    alphabet: [u8; SIZE],
    /// rank[symbol - 'A'] = position of symbol in `alphabet`
    rank: [u8; SIZE],
}

impl Tableau {
    /// Keyword letters in first-seen order, then the rest of A-Z.
    pub fn from_keyword(keyword: &str) -> Result<Self> {
        if keyword.is_empty() || !keyword.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidKeyword(keyword.to_string()));
        }

        let keyword = keyword.to_ascii_uppercase();
        let mut seen = [false; SIZE];
        let mut alphabet = [0u8; SIZE];
        let mut rank = [0u8; SIZE];
        let mut next = 0;

        for symbol in keyword.bytes().chain(ALPHABET.iter().copied()) {
            let slot = (symbol - b'A') as usize;
            if seen[slot] {
                continue;
            }
            seen[slot] = true;
            alphabet[next] = symbol;
            rank[slot] = next as u8;
            next += 1;
        }

        Ok(Self {
            keyword,
            alphabet,
            rank,
        })
    }

    /// Plain A-Z ordering.
    pub fn standard() -> Self {
        let mut rank = [0u8; SIZE];
        for (i, r) in rank.iter_mut().enumerate() {
            *r = i as u8;
        }
        Self {
            keyword: String::new(),
            alphabet: *ALPHABET,
            rank,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn alphabet(&self) -> &[u8; SIZE] {
        &self.alphabet
    }

    pub fn alphabet_string(&self) -> String {
        self.alphabet.iter().map(|&b| char::from(b)).collect()
    }

    /// Rank of an A-Z symbol.
    pub fn index(&self, symbol: u8) -> usize {
        debug_assert!(symbol.is_ascii_uppercase(), "symbol outside A-Z: {symbol}");
        self.rank[(symbol - b'A') as usize] as usize
    }

    /// Symbol at `rank mod 26`.
    pub fn symbol(&self, rank: usize) -> u8 {
        self.alphabet[rank % SIZE]
    }

    /// Key symbol that takes `plain` to `cipher`:
    /// `tableau[(index(cipher) - index(plain)) mod 26]`.
    pub fn key_symbol(&self, plain: u8, cipher: u8) -> u8 {
        self.symbol(self.delta(plain, cipher))
    }

    /// `(index(cipher) - index(plain)) mod 26`
    pub fn delta(&self, plain: u8, cipher: u8) -> usize {
        (SIZE + self.index(cipher) - self.index(plain)) % SIZE
    }

    /// Forward Vigenère step under this tableau.
    pub fn encrypt_symbol(&self, plain: u8, key: u8) -> u8 {
        self.symbol(self.index(plain) + self.index(key))
    }

    /// Pointwise key symbols for a crib over a ciphertext segment.
    /// Stops at the shorter of the two.
    pub fn key_run(&self, crib: &Text, segment: &Text) -> Text {
        Text::from_symbols(
            crib.as_bytes()
                .iter()
                .zip(segment.as_bytes())
                .map(|(&p, &c)| self.key_symbol(p, c)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(t: &Tableau) -> bool {
        let mut sorted = *t.alphabet();
        sorted.sort_unstable();
        sorted == *ALPHABET
    }

    #[test]
    fn test_kryptos_alphabet() {
        let t = Tableau::from_keyword("KRYPTOS").unwrap();
        assert_eq!(t.alphabet_string(), "KRYPTOSABCDEFGHIJLMNQUVWXZ");
        assert_eq!(t.index(b'K'), 0);
        assert_eq!(t.index(b'A'), 7);
        assert_eq!(t.index(b'Z'), 25);
    }

    #[test]
    fn test_duplicate_letters_skipped() {
        let t = Tableau::from_keyword("palimpsest").unwrap();
        assert_eq!(t.keyword(), "PALIMPSEST");
        assert_eq!(t.alphabet_string(), "PALIMSETBCDFGHJKNOQRUVWXYZ");
        assert!(is_permutation(&t));
    }

    #[test]
    fn test_every_keyword_gives_permutation() {
        for kw in ["A", "ZZZZ", "KRYPTOS", "ABSCISSA", "QWERTYUIOPASDFGHJKLZXCVBNM"] {
            let t = Tableau::from_keyword(kw).unwrap();
            assert!(is_permutation(&t), "{kw}");
            for (rank, &symbol) in t.alphabet().iter().enumerate() {
                assert_eq!(t.index(symbol), rank);
            }
        }
    }

    #[test]
    fn test_invalid_keyword() {
        assert!(matches!(Tableau::from_keyword(""), Err(Error::InvalidKeyword(_))));
        assert!(matches!(Tableau::from_keyword("KRYPTOS1"), Err(Error::InvalidKeyword(_))));
        assert!(matches!(Tableau::from_keyword("K R"), Err(Error::InvalidKeyword(_))));
    }

    #[test]
    fn test_key_symbol_inverts_encryption() {
        let t = Tableau::from_keyword("KRYPTOS").unwrap();
        for &p in ALPHABET {
            for &c in ALPHABET {
                let k = t.key_symbol(p, c);
                assert_eq!((t.index(p) + t.index(k)) % 26, t.index(c));
                assert_eq!(t.encrypt_symbol(p, k), c);
            }
        }
    }

    #[test]
    fn test_standard_tableau_is_plain_vigenere() {
        let t = Tableau::standard();
        // HELLO under KEY -> RIJVS
        let plain = Text::from_letters("HELLO").unwrap();
        let cipher = Text::from_letters("RIJVS").unwrap();
        assert_eq!(t.key_run(&plain, &cipher).as_str(), "KEYKE");
    }

    #[test]
    fn test_key_run_abscissa() {
        let t = Tableau::from_keyword("KRYPTOS").unwrap();
        // K2 ciphertext at offset 8 against its known plaintext
        let crib = Text::from_letters("ALLYINVISIBLE").unwrap();
        let segment = Text::from_letters("HZWETZYVGWHKK").unwrap();
        assert_eq!(t.key_run(&crib, &segment).as_str(), "ABSCISSAABSCI");
    }
}
