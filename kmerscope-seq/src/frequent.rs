//! Most-frequent k-mer search, exact and mismatch-tolerant.

use std::collections::{BTreeSet, HashMap};

use kmerscope_core::{KmerscopeError, Result};
use tracing::debug;

use crate::alphabet;
use crate::codec::{self, MAX_K};
use crate::frequency::{FrequencyStrategy, FrequencyTable};
use crate::kmer::KmerIter;
use crate::neighborhood::{self, neighborhood_size};

fn check_k(text_len: usize, k: usize) -> Result<()> {
    if k == 0 {
        return Err(KmerscopeError::InvalidArgument(
            "k-mer size must be at least 1".into(),
        ));
    }
    if k > text_len {
        return Err(KmerscopeError::InvalidArgument(format!(
            "k-mer size {} exceeds text length {}",
            k, text_len
        )));
    }
    Ok(())
}

/// Every length-`k` pattern with the highest occurrence count in `text`.
///
/// Ties are all returned. Uses the default (sorted) counting strategy.
///
/// # Errors
///
/// Returns an error if `k == 0`, `k > len(text)`, or `text` holds a byte
/// outside `{A, C, G, T}`.
///
/// # Example
///
/// ```
/// use kmerscope_seq::frequent::frequent_words;
///
/// let words = frequent_words(b"ACAACTATGCATACTATCGGGAACTATCCT", 5).unwrap();
/// assert_eq!(words.len(), 1);
/// assert!(words.contains(b"ACTAT".as_slice()));
/// ```
pub fn frequent_words(text: &[u8], k: usize) -> Result<BTreeSet<Vec<u8>>> {
    frequent_words_with(text, k, FrequencyStrategy::default())
}

/// [`frequent_words`] with an explicit counting strategy.
///
/// The result does not depend on the strategy.
pub fn frequent_words_with(
    text: &[u8],
    k: usize,
    strategy: FrequencyStrategy,
) -> Result<BTreeSet<Vec<u8>>> {
    check_k(text.len(), k)?;
    let table = FrequencyTable::build(text, k, strategy)?;
    let words = table.most_frequent();
    debug!(k, max_count = table.max_count(), found = words.len(), "frequent words");
    Ok(words)
}

/// Most frequent length-`k` patterns when each window also counts toward
/// every pattern within Hamming distance `d` of it.
///
/// The winners need not occur literally in `text`. With `d == 0` this is
/// [`frequent_words`].
///
/// # Errors
///
/// Returns an error if `k == 0`, `k > len(text)`, `k > MAX_K`, or `text`
/// holds a byte outside `{A, C, G, T}`.
pub fn frequent_words_with_mismatches(
    text: &[u8],
    k: usize,
    d: usize,
) -> Result<BTreeSet<Vec<u8>>> {
    check_k(text.len(), k)?;
    if k > MAX_K {
        return Err(KmerscopeError::InvalidArgument(format!(
            "k={} exceeds the maximum encodable k-mer size {}",
            k, MAX_K
        )));
    }
    let text = alphabet::normalize(text)?;
    debug!(
        k,
        d,
        windows = text.len() - k + 1,
        ball = neighborhood_size(k, d),
        "frequent words with mismatches"
    );

    let mut counts: HashMap<u64, usize> = HashMap::new();
    for window in KmerIter::new(&text, k)? {
        for neighbor in neighborhood::ball(window, d) {
            *counts.entry(codec::encode(&neighbor)?).or_insert(0) += 1;
        }
    }

    let max = counts.values().copied().max().unwrap_or(0);
    counts
        .into_iter()
        .filter(|&(_, c)| c == max)
        .map(|(code, _)| codec::decode(code, k))
        .collect()
}
