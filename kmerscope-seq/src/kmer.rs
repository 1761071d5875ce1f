//! Borrowed windows of fixed length.
//!
//! Every counter in the crate walks a text as its `len - k + 1` overlapping
//! windows. A `k` past the end of the text means there are no windows, so it
//! gives an empty walk instead of an error.

use kmerscope_core::{KmerscopeError, Result};

/// Overlapping length-`k` windows of a byte slice, left to right.
///
/// Knows its exact length and can be walked from either end.
pub struct KmerIter<'a> {
    inner: std::slice::Windows<'a, u8>,
    remaining: usize,
}

impl<'a> KmerIter<'a> {
    /// Windows of length `k` over `seq`.
    ///
    /// # Errors
    ///
    /// [`KmerscopeError::InvalidArgument`] when `k == 0`.
    pub fn new(seq: &'a [u8], k: usize) -> Result<Self> {
        if k == 0 {
            return Err(KmerscopeError::InvalidArgument(
                "k-mer size must be at least 1".into(),
            ));
        }
        Ok(Self {
            inner: seq.windows(k),
            remaining: (seq.len() + 1).saturating_sub(k),
        })
    }
}

impl<'a> Iterator for KmerIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let window = self.inner.next()?;
        self.remaining -= 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for KmerIter<'a> {}

impl<'a> DoubleEndedIterator for KmerIter<'a> {
    fn next_back(&mut self) -> Option<&'a [u8]> {
        let window = self.inner.next_back()?;
        self.remaining -= 1;
        Some(window)
    }
}
