//! Core trait definitions for the kmerscope workspace.

/// A nucleotide sequence viewed as raw bytes.
pub trait Sequence {
    /// The raw byte representation of the sequence.
    fn as_bytes(&self) -> &[u8];

    /// Length in bases.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the sequence is empty.
    fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Number of length-`k` windows, using the inclusive bound `len - k + 1`.
    ///
    /// Zero when `k == 0` or `k > len`.
    fn window_count(&self, k: usize) -> usize {
        if k == 0 || k > self.len() {
            0
        } else {
            self.len() - k + 1
        }
    }
}

/// A type that can produce a summary of its contents.
pub trait Summarizable {
    /// A one-line summary suitable for display.
    fn summary(&self) -> String;
}
