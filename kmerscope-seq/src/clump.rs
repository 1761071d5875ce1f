//! Sliding-window clump detection.
//!
//! A clump is a k-mer that occurs at least `min_count` times inside some
//! window of `window` bases. The first window is counted with the sorted run
//! counter; after that each one-base slide only touches two counters: the
//! k-mer leaving on the left and the one entering on the right. The scan is
//! therefore linear in the genome length, not in `genome × window`.

use std::collections::{BTreeSet, HashMap};

use kmerscope_core::{KmerscopeError, Result};
use tracing::{debug, trace};

use crate::alphabet;
use crate::codec::{self, MAX_K};
use crate::frequency::sorted_runs;

/// Parameters for [`find_clumps_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClumpParams {
    /// k-mer length.
    pub k: usize,
    /// Minimum occurrences inside one window (`t`).
    pub min_count: usize,
    /// Window length (`L`).
    pub window: usize,
}

impl Default for ClumpParams {
    /// The classic replication-origin search: 9-mers seen 3 times in 500 bp.
    fn default() -> Self {
        Self {
            k: 9,
            min_count: 3,
            window: 500,
        }
    }
}

impl ClumpParams {
    /// Parameters for `k`-mers seen `min_count` times within `window` bases.
    pub fn new(k: usize, min_count: usize, window: usize) -> Self {
        Self {
            k,
            min_count,
            window,
        }
    }

    /// Check the parameters against a genome of `genome_len` bases.
    ///
    /// # Errors
    ///
    /// Returns [`KmerscopeError::InvalidArgument`] if `k == 0`, `k > MAX_K`,
    /// `min_count == 0`, `window < k`, or `window > genome_len`.
    pub fn validate(&self, genome_len: usize) -> Result<()> {
        let problem = if self.k == 0 {
            Some("k-mer size must be at least 1".to_string())
        } else if self.k > MAX_K {
            Some(format!(
                "k={} exceeds the maximum encodable k-mer size {}",
                self.k, MAX_K
            ))
        } else if self.min_count == 0 {
            Some("min_count must be at least 1".to_string())
        } else if self.window < self.k {
            Some(format!("window {} is shorter than k={}", self.window, self.k))
        } else if self.window > genome_len {
            Some(format!(
                "window {} exceeds genome length {}",
                self.window, genome_len
            ))
        } else {
            None
        };
        match problem {
            Some(msg) => Err(KmerscopeError::InvalidArgument(msg)),
            None => Ok(()),
        }
    }
}

/// Every k-mer occurring at least `t` times in some length-`window` window
/// of `genome`.
///
/// Windows start at every position `0..=len(genome) - window`. A k-mer is
/// reported as soon as one window reaches `t` and stays reported.
///
/// # Errors
///
/// See [`ClumpParams::validate`]; also fails on bytes outside `{A, C, G, T}`.
///
/// # Example
///
/// ```
/// use kmerscope_seq::clump::find_clumps;
///
/// let genome = b"CGGACTCGACAGATGTGAAGAACGACAATGTGAAGACTCGACACGACAGAGTGAAGAGAAGAGGAAACATTGTAA";
/// let clumps = find_clumps(genome, 5, 4, 50).unwrap();
/// let found: Vec<&[u8]> = clumps.iter().map(|p| p.as_slice()).collect();
/// assert_eq!(found, vec![b"CGACA".as_slice(), b"GAAGA".as_slice()]);
/// ```
pub fn find_clumps(
    genome: &[u8],
    k: usize,
    t: usize,
    window: usize,
) -> Result<BTreeSet<Vec<u8>>> {
    find_clumps_with(genome, &ClumpParams::new(k, t, window))
}

/// [`find_clumps`] driven by a [`ClumpParams`].
pub fn find_clumps_with(genome: &[u8], params: &ClumpParams) -> Result<BTreeSet<Vec<u8>>> {
    params.validate(genome.len())?;
    let genome = alphabet::normalize(genome)?;
    let ClumpParams {
        k,
        min_count,
        window,
    } = *params;

    let codes = codec::encode_windows(&genome, k)?;
    let per_window = window - k + 1;

    let mut first = codes[..per_window].to_vec();
    let mut counts: HashMap<u64, usize> = sorted_runs(&mut first).into_iter().collect();
    let mut found: BTreeSet<u64> = counts
        .iter()
        .filter(|&(_, &c)| c >= min_count)
        .map(|(&code, _)| code)
        .collect();

    for start in 1..=genome.len() - window {
        let leaving = codes[start - 1];
        if let Some(c) = counts.get_mut(&leaving) {
            *c -= 1;
            if *c == 0 {
                counts.remove(&leaving);
            }
        }

        let entering = codes[start + per_window - 1];
        let c = counts.entry(entering).or_insert(0);
        *c += 1;
        if *c >= min_count && found.insert(entering) {
            trace!(start, code = entering, "new clump");
        }
    }

    debug!(
        k,
        min_count,
        window,
        windows = genome.len() - window + 1,
        clumps = found.len(),
        "clump scan finished"
    );
    found.into_iter().map(|code| codec::decode(code, k)).collect()
}
