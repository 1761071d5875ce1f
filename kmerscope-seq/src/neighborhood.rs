//! Hamming-ball (mismatch neighborhood) generation.
//!
//! The d-neighborhood of a pattern is built suffix by suffix. Starting from
//! the last symbol (whose 1-ball is the whole alphabet), each step prepends
//! one more symbol of the pattern: a partial neighbor that has used fewer than
//! `d` mismatches fans out to all four symbols, one that has used all `d`
//! only takes the pattern's own symbol. Every string of the ball is produced
//! exactly once, so no deduplication pass is needed and the work is
//! proportional to the ball's size rather than to `4^k`.
//!
//! The loop walks the pattern right to left and appends, so partial neighbors
//! are stored reversed and flipped once at the end.

use std::collections::BTreeSet;

use kmerscope_core::{KmerscopeError, Result};

use crate::alphabet::{self, ALPHABET};

/// Size of the Hamming ball of radius `d` around a length-`k` pattern:
/// `Σ_{i=0}^{min(d,k)} C(k, i) · 3^i`. Saturates at `u64::MAX`.
pub fn neighborhood_size(k: usize, d: usize) -> u64 {
    let mut total = 0u64;
    let mut binom = 1u64; // C(k, i)
    let mut pow3 = 1u64; // 3^i
    for i in 0..=d.min(k) {
        if i > 0 {
            binom = binom.saturating_mul((k - i + 1) as u64) / i as u64;
            pow3 = pow3.saturating_mul(3);
        }
        total = total.saturating_add(binom.saturating_mul(pow3));
    }
    total
}

/// Ball over an already-normalized, non-empty pattern. Each entry is unique.
pub(crate) fn ball(pattern: &[u8], d: usize) -> Vec<Vec<u8>> {
    let k = pattern.len();
    if d == 0 || k == 0 {
        return vec![pattern.to_vec()];
    }

    let capacity = neighborhood_size(k, d).min(1 << 20) as usize;
    let last = pattern[k - 1];
    // (reversed partial neighbor, mismatches against the matching suffix)
    let mut current: Vec<(Vec<u8>, usize)> = ALPHABET
        .iter()
        .map(|&b| {
            let mut s = Vec::with_capacity(k);
            s.push(b);
            (s, usize::from(b != last))
        })
        .collect();

    for &orig in pattern[..k - 1].iter().rev() {
        let mut next = Vec::with_capacity(capacity.max(current.len()));
        for (partial, dist) in current {
            if dist < d {
                for &b in &ALPHABET {
                    let mut s = partial.clone();
                    s.push(b);
                    next.push((s, dist + usize::from(b != orig)));
                }
            } else {
                let mut s = partial;
                s.push(orig);
                next.push((s, dist));
            }
        }
        current = next;
    }

    current
        .into_iter()
        .map(|(mut s, _)| {
            s.reverse();
            s
        })
        .collect()
}

/// All patterns within Hamming distance `d` of `pattern`, including itself.
///
/// Case-insensitive; results are uppercase.
///
/// # Errors
///
/// Returns [`KmerscopeError::InvalidArgument`] if `pattern` is empty while
/// `d > 0`, and [`KmerscopeError::InvalidSymbol`] for bytes outside
/// `{A, C, G, T}`.
///
/// # Example
///
/// ```
/// use kmerscope_seq::neighborhood::neighbors;
///
/// let ball = neighbors(b"AT", 1).unwrap();
/// assert_eq!(ball.len(), 7);
/// assert!(ball.contains(b"CT".as_slice()));
/// ```
pub fn neighbors(pattern: &[u8], d: usize) -> Result<BTreeSet<Vec<u8>>> {
    if pattern.is_empty() && d > 0 {
        return Err(KmerscopeError::InvalidArgument(
            "cannot take a mismatch neighborhood of an empty pattern".into(),
        ));
    }
    let pattern = alphabet::normalize(pattern)?;
    Ok(ball(&pattern, d).into_iter().collect())
}

/// The pattern followed by every single-substitution variant.
///
/// Variants are listed position by position, substitutes in alphabet order.
///
/// # Errors
///
/// Returns [`KmerscopeError::InvalidSymbol`] for bytes outside `{A, C, G, T}`.
pub fn immediate_neighbors(pattern: &[u8]) -> Result<Vec<Vec<u8>>> {
    let pattern = alphabet::normalize(pattern)?;
    let mut out = Vec::with_capacity(1 + 3 * pattern.len());
    out.push(pattern.clone());
    for i in 0..pattern.len() {
        for &b in &ALPHABET {
            if b != pattern[i] {
                let mut variant = pattern.clone();
                variant[i] = b;
                out.push(variant);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamming::mismatches;

    fn set(items: &[&str]) -> BTreeSet<Vec<u8>> {
        items.iter().map(|s| s.as_bytes().to_vec()).collect()
    }

    #[test]
    fn at_radius_one() {
        assert_eq!(
            neighbors(b"AT", 1).unwrap(),
            set(&["GT", "TT", "AG", "AC", "AT", "AA", "CT"])
        );
    }

    #[test]
    fn radius_zero_is_singleton() {
        assert_eq!(neighbors(b"acg", 0).unwrap(), set(&["ACG"]));
    }

    #[test]
    fn single_symbol_covers_alphabet() {
        assert_eq!(neighbors(b"G", 1).unwrap(), set(&["A", "C", "G", "T"]));
        assert_eq!(neighbors(b"G", 3).unwrap(), set(&["A", "C", "G", "T"]));
    }

    #[test]
    fn radius_at_least_k_is_everything() {
        assert_eq!(neighbors(b"ACG", 3).unwrap().len(), 64);
        assert_eq!(neighbors(b"ACG", 5).unwrap().len(), 64);
    }

    #[test]
    fn empty_pattern() {
        assert_eq!(neighbors(b"", 0).unwrap(), set(&[""]));
        assert!(matches!(
            neighbors(b"", 1),
            Err(KmerscopeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn invalid_symbol() {
        assert!(matches!(
            neighbors(b"AXG", 1),
            Err(KmerscopeError::InvalidSymbol { symbol: 'X', position: 1 })
        ));
    }

    #[test]
    fn ball_has_no_duplicates() {
        let raw = ball(b"ACGTAC", 2);
        let unique: BTreeSet<_> = raw.iter().cloned().collect();
        assert_eq!(raw.len(), unique.len());
        assert_eq!(raw.len() as u64, neighborhood_size(6, 2));
    }

    #[test]
    fn size_formula() {
        assert_eq!(neighborhood_size(2, 1), 7);
        assert_eq!(neighborhood_size(3, 0), 1);
        assert_eq!(neighborhood_size(3, 3), 64);
        assert_eq!(neighborhood_size(10, 2), 1 + 30 + 405);
    }

    #[test]
    fn long_pattern_does_not_recurse() {
        let pattern = vec![b'A'; 500];
        let ball = neighbors(&pattern, 1).unwrap();
        assert_eq!(ball.len(), 1 + 3 * 500);
        assert!(ball.iter().all(|n| mismatches(n, &pattern) <= 1));
    }

    #[test]
    fn immediate_neighbors_order() {
        let got = immediate_neighbors(b"CAA").unwrap();
        let want: Vec<Vec<u8>> = [
            "CAA", "AAA", "GAA", "TAA", "CCA", "CGA", "CTA", "CAC", "CAG", "CAT",
        ]
        .iter()
        .map(|s| s.as_bytes().to_vec())
        .collect();
        assert_eq!(got, want);
    }
}
