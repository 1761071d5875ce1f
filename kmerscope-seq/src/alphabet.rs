//! The fixed nucleotide alphabet.
//!
//! Symbols are ranked `A=0, C=1, G=2, T=3`. The rank is the 2-bit code used
//! by [`codec`](crate::codec) and the row index of every motif matrix.
//! Lowercase input is accepted everywhere and normalized to uppercase.

use kmerscope_core::{KmerscopeError, Result};

/// Human-readable alphabet name.
pub const NAME: &str = "DNA";

/// The four symbols, in rank order.
pub const ALPHABET: [u8; 4] = *b"ACGT";

/// 256-entry LUT: ASCII → rank, `0xFF` for anything outside the alphabet.
static RANK_LUT: [u8; 256] = {
    const X: u8 = 0xFF;
    let mut t = [X; 256];
    t[b'A' as usize] = 0;
    t[b'a' as usize] = 0;
    t[b'C' as usize] = 1;
    t[b'c' as usize] = 1;
    t[b'G' as usize] = 2;
    t[b'g' as usize] = 2;
    t[b'T' as usize] = 3;
    t[b't' as usize] = 3;
    t
};

/// Rank of a symbol (case-insensitive). `None` outside the alphabet.
#[inline]
pub fn rank(b: u8) -> Option<u8> {
    let v = RANK_LUT[b as usize];
    if v <= 3 {
        Some(v)
    } else {
        None
    }
}

/// Symbol for a rank. Only the low two bits are used.
#[inline]
pub fn symbol(rank: u8) -> u8 {
    ALPHABET[(rank & 0b11) as usize]
}

/// Check whether a byte is in the alphabet (either case).
#[inline]
pub fn is_valid(b: u8) -> bool {
    rank(b).is_some()
}

/// Rank of `seq[position]`, or an [`KmerscopeError::InvalidSymbol`] naming it.
#[inline]
pub(crate) fn rank_at(seq: &[u8], position: usize) -> Result<u8> {
    let b = seq[position];
    rank(b).ok_or(KmerscopeError::InvalidSymbol {
        symbol: b as char,
        position,
    })
}

/// Uppercase and validate a byte slice.
///
/// # Errors
///
/// Returns [`KmerscopeError::InvalidSymbol`] for the first byte outside
/// `{A, C, G, T}`.
pub fn normalize(seq: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(seq.len());
    for position in 0..seq.len() {
        out.push(symbol(rank_at(seq, position)?));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_alphabet_order() {
        for (i, &b) in ALPHABET.iter().enumerate() {
            assert_eq!(rank(b), Some(i as u8));
            assert_eq!(rank(b.to_ascii_lowercase()), Some(i as u8));
            assert_eq!(symbol(i as u8), b);
        }
    }

    #[test]
    fn rejects_iupac_and_rna() {
        for &b in b"NRYU*- " {
            assert!(!is_valid(b), "{} should be rejected", b as char);
        }
    }

    #[test]
    fn normalize_uppercases() {
        assert_eq!(normalize(b"acGt").unwrap(), b"ACGT");
    }

    #[test]
    fn normalize_reports_first_bad_position() {
        let err = normalize(b"ACNGX").unwrap_err();
        assert_eq!(
            err,
            KmerscopeError::InvalidSymbol {
                symbol: 'N',
                position: 2
            }
        );
    }

    #[test]
    fn normalize_empty() {
        assert!(normalize(b"").unwrap().is_empty());
    }
}
