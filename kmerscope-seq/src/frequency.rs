//! k-mer frequency tables with three interchangeable counting strategies.
//!
//! | Strategy | Time | Extra space | Limit |
//! |----------|------|-------------|-------|
//! | [`BruteForce`](FrequencyStrategy::BruteForce) | O(n²) | O(distinct) | none |
//! | [`DirectIndexed`](FrequencyStrategy::DirectIndexed) | O(n + 4^k) | O(4^k) | `k <= 12` |
//! | [`Sorted`](FrequencyStrategy::Sorted) | O(n log n) | O(n) | `k <= MAX_K` |
//!
//! All strategies produce the same [`FrequencyTable`] for the same input.

use std::collections::{BTreeMap, BTreeSet};

use kmerscope_core::{KmerscopeError, Result};
use tracing::debug;

use crate::alphabet;
use crate::codec::{self, RollingEncoder};
use crate::kmer::KmerIter;

/// Largest `k` the direct-indexed strategy will allocate `4^k` counters for.
pub const MAX_DIRECT_K: usize = 12;

/// How a [`FrequencyTable`] is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrequencyStrategy {
    /// Re-scan the text for every window. Reference implementation.
    BruteForce,
    /// One counter per possible pattern, one pass over the text.
    DirectIndexed,
    /// Encode every window, sort, count equal runs.
    #[default]
    Sorted,
}

/// Occurrence counts of every k-mer present in a text.
///
/// Only patterns that occur are stored. Iteration is lexicographic, which is
/// also index order under the codec.
///
/// With the `serde` feature the table serializes as
/// `{"k": 2, "counts": [["AC", 1], ...]}`. Deserialization checks every
/// pattern, so a loaded table holds the same guarantees as a built one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "FrequencyTableRepr", into = "FrequencyTableRepr")
)]
pub struct FrequencyTable {
    k: usize,
    counts: BTreeMap<Vec<u8>, usize>,
}

impl FrequencyTable {
    /// Count every length-`k` window of `text` using `strategy`.
    ///
    /// A `k` longer than the text yields an empty table.
    ///
    /// # Errors
    ///
    /// Returns an error if `k == 0`, if `text` holds a byte outside
    /// `{A, C, G, T}`, or if `k` exceeds the strategy's limit.
    pub fn build(text: &[u8], k: usize, strategy: FrequencyStrategy) -> Result<Self> {
        if k == 0 {
            return Err(KmerscopeError::InvalidArgument(
                "k-mer size must be at least 1".into(),
            ));
        }
        let text = alphabet::normalize(text)?;
        if k > text.len() {
            return Ok(Self {
                k,
                counts: BTreeMap::new(),
            });
        }
        debug!(
            ?strategy,
            k,
            windows = text.len() - k + 1,
            "building frequency table"
        );
        let counts = match strategy {
            FrequencyStrategy::BruteForce => brute_force(&text, k)?,
            FrequencyStrategy::DirectIndexed => direct_indexed(&text, k)?,
            FrequencyStrategy::Sorted => sorted(&text, k)?,
        };
        Ok(Self { k, counts })
    }

    /// Pattern length this table was built for.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Occurrences of `pattern` (case-insensitive). Zero if absent.
    pub fn count(&self, pattern: &[u8]) -> usize {
        let upper = pattern.to_ascii_uppercase();
        self.counts.get(&upper).copied().unwrap_or(0)
    }

    /// Sum of all counts, i.e. the number of windows counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct patterns present.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Whether no window was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Highest count in the table, 0 when empty.
    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Every pattern whose count equals [`max_count`](Self::max_count).
    pub fn most_frequent(&self) -> BTreeSet<Vec<u8>> {
        let max = self.max_count();
        self.counts
            .iter()
            .filter(|&(_, &c)| c == max && c > 0)
            .map(|(p, _)| p.clone())
            .collect()
    }

    /// `(pattern, count)` pairs in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], usize)> + '_ {
        self.counts.iter().map(|(p, &c)| (p.as_slice(), c))
    }
}

/// Wire form of [`FrequencyTable`], patterns as strings.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct FrequencyTableRepr {
    k: usize,
    counts: Vec<(String, usize)>,
}

#[cfg(feature = "serde")]
impl From<FrequencyTable> for FrequencyTableRepr {
    fn from(table: FrequencyTable) -> Self {
        Self {
            k: table.k,
            counts: table
                .counts
                .into_iter()
                .map(|(p, c)| (String::from_utf8_lossy(&p).into_owned(), c))
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<FrequencyTableRepr> for FrequencyTable {
    type Error = KmerscopeError;

    fn try_from(repr: FrequencyTableRepr) -> Result<Self> {
        let k = repr.k;
        if k == 0 {
            return Err(KmerscopeError::InvalidArgument(
                "k-mer size must be at least 1".into(),
            ));
        }
        let mut counts = BTreeMap::new();
        for (pattern, c) in repr.counts {
            let pattern = alphabet::normalize(pattern.as_bytes())?;
            if pattern.len() != k {
                return Err(KmerscopeError::InconsistentLength {
                    expected: k,
                    actual: pattern.len(),
                });
            }
            if c == 0 {
                return Err(KmerscopeError::InvalidArgument(format!(
                    "pattern {} has a zero count",
                    String::from_utf8_lossy(&pattern)
                )));
            }
            if counts.insert(pattern, c).is_some() {
                return Err(KmerscopeError::InvalidArgument(
                    "pattern listed more than once".into(),
                ));
            }
        }
        Ok(Self { k, counts })
    }
}

fn brute_force(text: &[u8], k: usize) -> Result<BTreeMap<Vec<u8>, usize>> {
    let mut counts = BTreeMap::new();
    for window in KmerIter::new(text, k)? {
        if counts.contains_key(window) {
            continue;
        }
        let n = KmerIter::new(text, k)?.filter(|w| *w == window).count();
        counts.insert(window.to_vec(), n);
    }
    Ok(counts)
}

fn direct_indexed(text: &[u8], k: usize) -> Result<BTreeMap<Vec<u8>, usize>> {
    let dense = dense_counts(text, k)?;
    let mut counts = BTreeMap::new();
    for (index, &c) in dense.iter().enumerate() {
        if c > 0 {
            counts.insert(codec::decode(index as u64, k)?, c);
        }
    }
    Ok(counts)
}

fn sorted(text: &[u8], k: usize) -> Result<BTreeMap<Vec<u8>, usize>> {
    let mut codes = codec::encode_windows(text, k)?;
    sorted_runs(&mut codes)
        .into_iter()
        .map(|(code, c)| Ok((codec::decode(code, k)?, c)))
        .collect()
}

/// Sort `codes` in place and collapse equal neighbors into `(code, run length)`.
pub(crate) fn sorted_runs(codes: &mut [u64]) -> Vec<(u64, usize)> {
    codes.sort_unstable();
    let mut runs: Vec<(u64, usize)> = Vec::new();
    for &code in codes.iter() {
        if let Some((last, n)) = runs.last_mut() {
            if *last == code {
                *n += 1;
                continue;
            }
        }
        runs.push((code, 1));
    }
    runs
}

fn dense_counts(text: &[u8], k: usize) -> Result<Vec<usize>> {
    if k > MAX_DIRECT_K {
        return Err(KmerscopeError::InvalidArgument(format!(
            "k={} exceeds the direct-indexed limit {}; use the sorted strategy",
            k, MAX_DIRECT_K
        )));
    }
    let mut dense = vec![0usize; codec::index_space(k)? as usize];
    for code in RollingEncoder::new(text, k)? {
        dense[code as usize] += 1;
    }
    Ok(dense)
}

/// Dense frequency array: entry `i` is the count of the pattern with index `i`.
///
/// Has `4^k` entries regardless of the text length.
///
/// # Errors
///
/// Returns an error if `k == 0`, `k > MAX_DIRECT_K`, or `text` holds a byte
/// outside `{A, C, G, T}`.
pub fn frequency_array(text: &[u8], k: usize) -> Result<Vec<usize>> {
    dense_counts(text, k)
}
