//! Bijective k-mer ↔ integer codec.
//!
//! A pattern of length `k` maps to an index in `[0, 4^k)` by reading it as a
//! base-4 number, most significant symbol first: A=0, C=1, G=2, T=3. Since
//! every symbol is 2 bits, `4^k` is `1 << 2k`, and `k` is capped at
//! [`MAX_K`] so that every index fits in a `u64`.
//!
//! Also provides a rolling encoder that produces the index of every window in
//! O(1) per step, and a sentinel-prefixed packing that keeps leading `A`s.

use kmerscope_core::{KmerscopeError, Result};

use crate::alphabet;

/// Largest pattern length the codec accepts.
pub const MAX_K: usize = 31;

fn check_k(k: usize) -> Result<()> {
    if k > MAX_K {
        return Err(KmerscopeError::InvalidArgument(format!(
            "k={} exceeds the maximum encodable k-mer size {}",
            k, MAX_K
        )));
    }
    Ok(())
}

/// Number of distinct patterns of length `k` (`4^k`).
///
/// # Errors
///
/// Returns an error if `k > MAX_K`.
pub fn index_space(k: usize) -> Result<u64> {
    check_k(k)?;
    Ok(1u64 << (2 * k))
}

/// Encode a pattern to its index.
///
/// Case-insensitive. The empty pattern encodes to 0.
///
/// # Errors
///
/// Returns [`KmerscopeError::InvalidSymbol`] for bytes outside `{A, C, G, T}`
/// and [`KmerscopeError::InvalidArgument`] if the pattern is longer than
/// [`MAX_K`].
///
/// # Example
///
/// ```
/// use kmerscope_seq::codec::encode;
///
/// assert_eq!(encode(b"AGT").unwrap(), 11);
/// ```
pub fn encode(pattern: &[u8]) -> Result<u64> {
    check_k(pattern.len())?;
    let mut code = 0u64;
    for position in 0..pattern.len() {
        code = (code << 2) | alphabet::rank_at(pattern, position)? as u64;
    }
    Ok(code)
}

/// Decode an index back to its uppercase pattern of length `k`.
///
/// # Errors
///
/// Returns [`KmerscopeError::OutOfRange`] if `index >= 4^k` and
/// [`KmerscopeError::InvalidArgument`] if `k > MAX_K`.
pub fn decode(index: u64, k: usize) -> Result<Vec<u8>> {
    if index >= index_space(k)? {
        return Err(KmerscopeError::OutOfRange { index, k });
    }
    let mut pattern = vec![0u8; k];
    let mut rest = index;
    for slot in pattern.iter_mut().rev() {
        *slot = alphabet::symbol((rest & 0b11) as u8);
        rest >>= 2;
    }
    Ok(pattern)
}

/// Pack a sequence into a sentinel-prefixed 2-bit integer.
///
/// A single `1` bit precedes the symbols, so `"A"` and `"AA"` pack to
/// different values and [`unpack`] recovers the length.
///
/// # Errors
///
/// Same conditions as [`encode`].
///
/// # Example
///
/// ```
/// use kmerscope_seq::codec::{pack, unpack};
///
/// assert_eq!(pack(b"ACGT").unwrap(), 283);
/// assert_eq!(unpack(283).unwrap(), b"ACGT");
/// ```
pub fn pack(seq: &[u8]) -> Result<u64> {
    let code = encode(seq)?;
    Ok((1u64 << (2 * seq.len())) | code)
}

/// Inverse of [`pack`].
///
/// # Errors
///
/// Returns an error if `bits` carries no sentinel (is 0) or the sentinel sits
/// on an odd bit, which no packed sequence produces.
pub fn unpack(bits: u64) -> Result<Vec<u8>> {
    if bits == 0 {
        return Err(KmerscopeError::InvalidArgument(
            "packed value must carry a sentinel bit".into(),
        ));
    }
    let payload_bits = 63 - bits.leading_zeros() as usize;
    if payload_bits % 2 != 0 {
        return Err(KmerscopeError::InvalidArgument(format!(
            "sentinel at bit {} does not delimit whole symbols",
            payload_bits
        )));
    }
    let k = payload_bits / 2;
    decode(bits & !(1u64 << payload_bits), k)
}

/// Iterator over the indices of every length-`k` window of a sequence.
///
/// The first window is encoded in full; each following one shifts in the new
/// symbol and masks off the one that left. Yields `len - k + 1` indices, or
/// none when `k > len`.
#[derive(Debug, Clone)]
pub struct RollingEncoder<'a> {
    seq: &'a [u8],
    k: usize,
    next_start: usize,
    code: u64,
    mask: u64,
}

impl<'a> RollingEncoder<'a> {
    /// Create a rolling encoder over `seq`.
    ///
    /// The whole sequence is validated up front so iteration cannot fail.
    ///
    /// # Errors
    ///
    /// Returns an error if `k == 0`, `k > MAX_K`, or `seq` contains a byte
    /// outside `{A, C, G, T}`.
    pub fn new(seq: &'a [u8], k: usize) -> Result<Self> {
        if k == 0 {
            return Err(KmerscopeError::InvalidArgument(
                "k-mer size must be at least 1".into(),
            ));
        }
        check_k(k)?;
        for position in 0..seq.len() {
            alphabet::rank_at(seq, position)?;
        }
        let code = if k <= seq.len() { encode(&seq[..k])? } else { 0 };
        Ok(Self {
            seq,
            k,
            next_start: 0,
            code,
            mask: (1u64 << (2 * k)) - 1,
        })
    }

    fn remaining(&self) -> usize {
        (self.seq.len() + 1).saturating_sub(self.k + self.next_start)
    }
}

impl<'a> Iterator for RollingEncoder<'a> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining() == 0 {
            return None;
        }
        if self.next_start > 0 {
            let entering = self.seq[self.next_start + self.k - 1];
            let r = alphabet::rank(entering).unwrap_or(0) as u64;
            self.code = ((self.code << 2) | r) & self.mask;
        }
        self.next_start += 1;
        Some(self.code)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for RollingEncoder<'a> {}

/// Index of every length-`k` window of `seq`, in order.
pub fn encode_windows(seq: &[u8], k: usize) -> Result<Vec<u64>> {
    Ok(RollingEncoder::new(seq, k)?.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_known_values() {
        assert_eq!(encode(b"AGT").unwrap(), 11);
        assert_eq!(encode(b"GCGGTAA").unwrap(), 9904);
        assert_eq!(encode(b"agt").unwrap(), 11);
    }

    #[test]
    fn decode_known_values() {
        assert_eq!(decode(11, 3).unwrap(), b"AGT");
        assert_eq!(decode(9904, 7).unwrap(), b"GCGGTAA");
        assert_eq!(decode(0, 4).unwrap(), b"AAAA");
    }

    #[test]
    fn empty_pattern_is_zero() {
        assert_eq!(encode(b"").unwrap(), 0);
        assert!(decode(0, 0).unwrap().is_empty());
        assert!(matches!(
            decode(1, 0),
            Err(KmerscopeError::OutOfRange { index: 1, k: 0 })
        ));
    }

    #[test]
    fn decode_out_of_range() {
        assert!(matches!(
            decode(64, 3),
            Err(KmerscopeError::OutOfRange { index: 64, k: 3 })
        ));
        assert_eq!(decode(63, 3).unwrap(), b"TTT");
    }

    #[test]
    fn encode_invalid_symbol() {
        assert_eq!(
            encode(b"ACNT").unwrap_err(),
            KmerscopeError::InvalidSymbol {
                symbol: 'N',
                position: 2
            }
        );
    }

    #[test]
    fn max_k_boundaries() {
        let longest = vec![b'T'; MAX_K];
        let code = encode(&longest).unwrap();
        assert_eq!(code, index_space(MAX_K).unwrap() - 1);
        assert_eq!(decode(code, MAX_K).unwrap(), longest);

        let too_long = vec![b'A'; MAX_K + 1];
        assert!(matches!(
            encode(&too_long),
            Err(KmerscopeError::InvalidArgument(_))
        ));
        assert!(matches!(
            decode(0, MAX_K + 1),
            Err(KmerscopeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn pack_keeps_leading_a() {
        assert_eq!(pack(b"ACGT").unwrap(), 283);
        assert_ne!(pack(b"A").unwrap(), pack(b"AA").unwrap());
        assert_eq!(unpack(pack(b"AAC").unwrap()).unwrap(), b"AAC");
        assert_eq!(pack(b"").unwrap(), 1);
        assert!(unpack(1).unwrap().is_empty());
    }

    #[test]
    fn unpack_rejects_bad_sentinel() {
        assert!(unpack(0).is_err());
        // 0b10: sentinel at bit 1 leaves half a symbol.
        assert!(unpack(0b10).is_err());
    }

    #[test]
    fn rolling_matches_direct_encoding() {
        let seq = b"ACGTTGCAAGTC";
        for k in 1..=seq.len() {
            let rolled = encode_windows(seq, k).unwrap();
            let direct: Vec<u64> = seq.windows(k).map(|w| encode(w).unwrap()).collect();
            assert_eq!(rolled, direct, "k={}", k);
        }
    }

    #[test]
    fn rolling_exact_size() {
        let enc = RollingEncoder::new(b"ACGTA", 2).unwrap();
        assert_eq!(enc.len(), 4);
        assert_eq!(RollingEncoder::new(b"AC", 3).unwrap().count(), 0);
    }

    #[test]
    fn rolling_rejects_bad_input() {
        assert!(RollingEncoder::new(b"ACGT", 0).is_err());
        assert!(RollingEncoder::new(b"ACGT", MAX_K + 1).is_err());
        assert!(RollingEncoder::new(b"ACGTX", 2).is_err());
    }
}
