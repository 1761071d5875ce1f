//! Hamming distance and exact pattern occurrence counting.

use kmerscope_core::{KmerscopeError, Result};

use crate::alphabet;
use crate::kmer::KmerIter;

/// Mismatching positions between two already-normalized, equal-length slices.
#[inline]
pub(crate) fn mismatches(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// Number of positions at which two equal-length sequences differ.
///
/// Case-insensitive.
///
/// # Errors
///
/// Returns [`KmerscopeError::InconsistentLength`] if the lengths differ and
/// [`KmerscopeError::InvalidSymbol`] for bytes outside `{A, C, G, T}`.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> Result<usize> {
    if a.len() != b.len() {
        return Err(KmerscopeError::InconsistentLength {
            expected: a.len(),
            actual: b.len(),
        });
    }
    let a = alphabet::normalize(a)?;
    let b = alphabet::normalize(b)?;
    Ok(mismatches(&a, &b))
}

fn check_pattern(pattern: &[u8]) -> Result<()> {
    if pattern.is_empty() {
        return Err(KmerscopeError::InvalidArgument(
            "pattern must not be empty".into(),
        ));
    }
    Ok(())
}

/// 0-based start of every (possibly overlapping) occurrence of `pattern`.
///
/// Positions index into `text` directly. Exercises that number positions
/// from 1 (where `TAT` in the text below sits at 6, 15 and 25) need each
/// entry incremented.
///
/// # Errors
///
/// Returns an error if `pattern` is empty or either input holds a byte
/// outside `{A, C, G, T}`.
///
/// # Example
///
/// ```
/// use kmerscope_seq::hamming::pattern_positions;
///
/// let text = b"ACAACTATGCATACTATCGGGAACTATCCT";
/// assert_eq!(pattern_positions(text, b"TAT").unwrap(), vec![5, 14, 24]);
/// ```
pub fn pattern_positions(text: &[u8], pattern: &[u8]) -> Result<Vec<usize>> {
    check_pattern(pattern)?;
    let text = alphabet::normalize(text)?;
    let pattern = alphabet::normalize(pattern)?;
    Ok(KmerIter::new(&text, pattern.len())?
        .enumerate()
        .filter(|(_, window)| *window == pattern.as_slice())
        .map(|(i, _)| i)
        .collect())
}

/// Number of (possibly overlapping) occurrences of `pattern` in `text`.
///
/// Every start position `0..=len(text) - len(pattern)` is checked; a pattern
/// longer than the text occurs zero times.
///
/// # Errors
///
/// Same conditions as [`pattern_positions`].
///
/// # Example
///
/// ```
/// use kmerscope_seq::hamming::pattern_count;
///
/// let n = pattern_count(b"ACAACTATGCATACTATCGGGAACTATCCT", b"ACTAT").unwrap();
/// assert_eq!(n, 3);
/// ```
pub fn pattern_count(text: &[u8], pattern: &[u8]) -> Result<usize> {
    Ok(pattern_positions(text, pattern)?.len())
}
