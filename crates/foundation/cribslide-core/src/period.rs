//! Minimal period detection

/// `true` if every `sequence[i] == sequence[i % p]`.
pub fn is_period<T: PartialEq>(sequence: &[T], p: usize) -> bool {
    p > 0
        && sequence
            .iter()
            .enumerate()
            .all(|(i, symbol)| *symbol == sequence[i % p])
}

/// Smallest `p` in `1..=min(max_period, len)` for which the sequence is the
/// periodic continuation of its first `p` symbols. Falls back to the full
/// length when no such `p` exists; an empty sequence gives 0.
pub fn minimal_period<T: PartialEq>(sequence: &[T], max_period: usize) -> usize {
    (1..=max_period.min(sequence.len()))
        .find(|&p| is_period(sequence, p))
        .unwrap_or(sequence.len())
}
