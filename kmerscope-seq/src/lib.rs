//! k-mer indexing and frequent-pattern analysis for DNA sequences.
//!
//! - **Codec** — [`encode`] / [`decode`] between patterns and `u64` indices,
//!   plus a [`RollingEncoder`] over every window
//! - **Frequency tables** — [`FrequencyTable`] with brute-force, direct-indexed
//!   and sorted counting ([`FrequencyStrategy`])
//! - **Neighborhoods** — [`neighbors`], the Hamming ball of radius `d`
//! - **Frequent words** — [`frequent_words`] and
//!   [`frequent_words_with_mismatches`]
//! - **Clumps** — [`find_clumps`], sliding-window repeat detection
//! - **Motifs** — [`MotifSet`], count/profile matrices, consensus and score
//! - **Skew** — [`skew`] and [`minimum_skew`]
//!
//! Input is case-insensitive over `{A, C, G, T}`; every result is uppercase.
//!
//! # Example
//!
//! ```
//! use kmerscope_seq::{decode, encode, frequent_words, neighbors, MotifSet};
//!
//! assert_eq!(encode(b"AGT").unwrap(), 11);
//! assert_eq!(decode(11, 3).unwrap(), b"AGT");
//!
//! let words = frequent_words(b"acaactatgcatactatcgggaactatcct", 5).unwrap();
//! assert!(words.contains(b"ACTAT".as_slice()));
//!
//! assert_eq!(neighbors(b"AT", 1).unwrap().len(), 7);
//!
//! let motifs = MotifSet::new(&["TCGGGGGTTTTT", "CCGGTGACTTAC", "ACGGGGATTTTC"]).unwrap();
//! assert_eq!(motifs.consensus().unwrap().len(), 12);
//! ```

pub mod alphabet;
pub mod clump;
pub mod codec;
pub mod frequency;
pub mod frequent;
pub mod hamming;
pub mod kmer;
pub mod motif;
pub mod neighborhood;
pub mod seq;
pub mod skew;

pub use seq::DnaSeq;

pub use kmer::KmerIter;

pub use codec::{decode, encode, pack, unpack, RollingEncoder, MAX_K};

pub use hamming::{hamming_distance, pattern_count, pattern_positions};

pub use neighborhood::{immediate_neighbors, neighborhood_size, neighbors};

pub use frequency::{frequency_array, FrequencyStrategy, FrequencyTable, MAX_DIRECT_K};

pub use frequent::{frequent_words, frequent_words_with, frequent_words_with_mismatches};

pub use clump::{find_clumps, find_clumps_with, ClumpParams};

pub use motif::{consensus, count_matrix, profile, score, CountMatrix, MotifSet, ProfileMatrix};

pub use skew::{minimum_skew, skew};
