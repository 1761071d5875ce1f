//! Motif matrices: counts, profile, consensus, and score.
//!
//! Every matrix is stored per position as `[A, C, G, T]`, indexed by symbol
//! rank, so "all four symbols present" holds by construction.

use kmerscope_core::{KmerscopeError, Result};

use crate::alphabet::{self, ALPHABET};
use crate::hamming::mismatches;
use crate::seq::DnaSeq;

/// Tolerance used when checking that profile columns sum to one.
pub const PROFILE_TOLERANCE: f64 = 1e-9;

/// An ordered list of equal-length motifs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifSet {
    motifs: Vec<DnaSeq>,
    width: usize,
}

/// Per-position symbol counts: `columns[pos] = [n_A, n_C, n_G, n_T]`.
///
/// Every column sums to [`n_motifs`](Self::n_motifs), which is never zero.
/// Deserialization enforces the same rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CountMatrixRepr", into = "CountMatrixRepr")
)]
pub struct CountMatrix {
    columns: Vec<[usize; 4]>,
    n_motifs: usize,
}

/// Per-position symbol frequencies: `columns[pos] = [p_A, p_C, p_G, p_T]`.
///
/// Serializes as the bare list of columns; loading goes through
/// [`ProfileMatrix::from_columns`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<[f64; 4]>", into = "Vec<[f64; 4]>")
)]
pub struct ProfileMatrix {
    columns: Vec<[f64; 4]>,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct CountMatrixRepr {
    columns: Vec<[usize; 4]>,
    n_motifs: usize,
}

impl MotifSet {
    /// Validate and normalize a list of motifs.
    ///
    /// # Errors
    ///
    /// [`KmerscopeError::EmptyInput`] for an empty list,
    /// [`KmerscopeError::InconsistentLength`] if lengths differ, and
    /// [`KmerscopeError::InvalidSymbol`] for bytes outside `{A, C, G, T}`.
    pub fn new<S: AsRef<[u8]>>(motifs: &[S]) -> Result<Self> {
        let first = motifs
            .first()
            .ok_or_else(|| KmerscopeError::EmptyInput("at least one motif is required".into()))?;
        let width = first.as_ref().len();
        let mut validated = Vec::with_capacity(motifs.len());
        for m in motifs {
            let m = m.as_ref();
            if m.len() != width {
                return Err(KmerscopeError::InconsistentLength {
                    expected: width,
                    actual: m.len(),
                });
            }
            validated.push(DnaSeq::new(m)?);
        }
        Ok(Self {
            motifs: validated,
            width,
        })
    }

    /// Number of motifs.
    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    /// Always false; construction rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    /// Shared motif length.
    pub fn motif_len(&self) -> usize {
        self.width
    }

    /// The motifs, in input order.
    pub fn iter(&self) -> impl Iterator<Item = &DnaSeq> {
        self.motifs.iter()
    }

    /// Count each symbol at each position.
    pub fn count_matrix(&self) -> CountMatrix {
        let mut columns = vec![[0usize; 4]; self.width];
        for motif in &self.motifs {
            for (pos, &b) in motif.iter().enumerate() {
                if let Some(r) = alphabet::rank(b) {
                    columns[pos][r as usize] += 1;
                }
            }
        }
        CountMatrix {
            columns,
            n_motifs: self.motifs.len(),
        }
    }

    /// Shorthand for `self.count_matrix().profile()`.
    pub fn profile(&self) -> Result<ProfileMatrix> {
        self.count_matrix().profile()
    }

    /// Consensus string of this set.
    pub fn consensus(&self) -> Result<Vec<u8>> {
        self.profile()?.consensus()
    }

    /// Sum of Hamming distances from every motif to `consensus`.
    ///
    /// # Errors
    ///
    /// [`KmerscopeError::InconsistentLength`] if `consensus` is not
    /// [`motif_len`](Self::motif_len) long.
    pub fn score(&self, consensus: &[u8]) -> Result<usize> {
        if consensus.len() != self.width {
            return Err(KmerscopeError::InconsistentLength {
                expected: self.width,
                actual: consensus.len(),
            });
        }
        let consensus = alphabet::normalize(consensus)?;
        Ok(self.motifs.iter().map(|m| mismatches(m, &consensus)).sum())
    }

    /// Consensus and its score in one go.
    pub fn consensus_score(&self) -> Result<(Vec<u8>, usize)> {
        let consensus = self.consensus()?;
        let score = self.score(&consensus)?;
        Ok((consensus, score))
    }
}

impl CountMatrix {
    /// Build a count matrix from raw per-position counts.
    ///
    /// # Errors
    ///
    /// [`KmerscopeError::DegenerateInput`] unless every column has the same,
    /// non-zero total.
    pub fn from_columns(columns: Vec<[usize; 4]>) -> Result<Self> {
        let n_motifs = columns.first().map(|c| c.iter().sum()).unwrap_or(0);
        Self::checked(columns, n_motifs)
    }

    fn checked(columns: Vec<[usize; 4]>, n_motifs: usize) -> Result<Self> {
        if n_motifs == 0 {
            return Err(KmerscopeError::DegenerateInput(
                "count matrix needs at least one motif".into(),
            ));
        }
        for (pos, col) in columns.iter().enumerate() {
            let total: usize = col.iter().sum();
            if total != n_motifs {
                return Err(KmerscopeError::DegenerateInput(format!(
                    "column {} sums to {} but {} motifs were counted",
                    pos, total, n_motifs
                )));
            }
        }
        Ok(Self { columns, n_motifs })
    }

    /// Per-position `[A, C, G, T]` counts.
    pub fn columns(&self) -> &[[usize; 4]] {
        &self.columns
    }

    /// Number of motifs counted (every column's total).
    pub fn n_motifs(&self) -> usize {
        self.n_motifs
    }

    /// Motif length.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Counts of one symbol across all positions. `None` outside the alphabet.
    pub fn row(&self, symbol: u8) -> Option<Vec<usize>> {
        let r = alphabet::rank(symbol)? as usize;
        Some(self.columns.iter().map(|col| col[r]).collect())
    }

    /// Divide every count by the number of motifs.
    ///
    /// # Errors
    ///
    /// [`KmerscopeError::DegenerateInput`] if the total is zero.
    pub fn profile(&self) -> Result<ProfileMatrix> {
        if self.n_motifs == 0 {
            return Err(KmerscopeError::DegenerateInput(
                "cannot build a profile from zero motifs".into(),
            ));
        }
        let n = self.n_motifs as f64;
        let columns = self
            .columns
            .iter()
            .map(|col| col.map(|c| c as f64 / n))
            .collect();
        Ok(ProfileMatrix { columns })
    }
}

impl ProfileMatrix {
    /// Build a profile from raw per-position frequencies.
    ///
    /// # Errors
    ///
    /// [`KmerscopeError::DegenerateInput`] if an entry is not a finite value
    /// in `[0, 1]` or a column does not sum to 1 within
    /// [`PROFILE_TOLERANCE`].
    pub fn from_columns(columns: Vec<[f64; 4]>) -> Result<Self> {
        for (pos, col) in columns.iter().enumerate() {
            if col.iter().any(|p| !p.is_finite() || *p < 0.0 || *p > 1.0) {
                return Err(KmerscopeError::DegenerateInput(format!(
                    "profile column {} holds a value outside [0, 1]",
                    pos
                )));
            }
            let total: f64 = col.iter().sum();
            if (total - 1.0).abs() > PROFILE_TOLERANCE {
                return Err(KmerscopeError::DegenerateInput(format!(
                    "profile column {} sums to {}",
                    pos, total
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Per-position `[A, C, G, T]` frequencies.
    pub fn columns(&self) -> &[[f64; 4]] {
        &self.columns
    }

    /// Motif length.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Frequencies of one symbol across all positions.
    pub fn row(&self, symbol: u8) -> Option<Vec<f64>> {
        let r = alphabet::rank(symbol)? as usize;
        Some(self.columns.iter().map(|col| col[r]).collect())
    }

    /// Most frequent symbol at each position.
    ///
    /// Ties go to the symbol earliest in `A, C, G, T`: a later symbol only
    /// wins with a strictly greater frequency.
    ///
    /// # Errors
    ///
    /// [`KmerscopeError::DegenerateInput`] if a column has no positive entry.
    pub fn consensus(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.columns.len());
        for (pos, col) in self.columns.iter().enumerate() {
            let mut best = None;
            let mut max = 0.0;
            for (r, &p) in col.iter().enumerate() {
                if p > max {
                    max = p;
                    best = Some(r);
                }
            }
            match best {
                Some(r) => out.push(ALPHABET[r]),
                None => {
                    return Err(KmerscopeError::DegenerateInput(format!(
                        "profile column {} has no observed symbol",
                        pos
                    )))
                }
            }
        }
        Ok(out)
    }
}

#[cfg(feature = "serde")]
impl From<CountMatrix> for CountMatrixRepr {
    fn from(m: CountMatrix) -> Self {
        Self {
            columns: m.columns,
            n_motifs: m.n_motifs,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<CountMatrixRepr> for CountMatrix {
    type Error = KmerscopeError;

    fn try_from(repr: CountMatrixRepr) -> Result<Self> {
        CountMatrix::checked(repr.columns, repr.n_motifs)
    }
}

#[cfg(feature = "serde")]
impl From<ProfileMatrix> for Vec<[f64; 4]> {
    fn from(m: ProfileMatrix) -> Self {
        m.columns
    }
}

#[cfg(feature = "serde")]
impl TryFrom<Vec<[f64; 4]>> for ProfileMatrix {
    type Error = KmerscopeError;

    fn try_from(columns: Vec<[f64; 4]>) -> Result<Self> {
        ProfileMatrix::from_columns(columns)
    }
}

/// Count matrix of a list of equal-length motifs.
///
/// # Errors
///
/// See [`MotifSet::new`].
pub fn count_matrix<S: AsRef<[u8]>>(motifs: &[S]) -> Result<CountMatrix> {
    Ok(MotifSet::new(motifs)?.count_matrix())
}

/// Profile matrix of a count matrix. See [`CountMatrix::profile`].
pub fn profile(counts: &CountMatrix) -> Result<ProfileMatrix> {
    counts.profile()
}

/// Consensus of a profile matrix. See [`ProfileMatrix::consensus`].
pub fn consensus(profile: &ProfileMatrix) -> Result<Vec<u8>> {
    profile.consensus()
}

/// Sum of Hamming distances from every motif to `consensus`.
///
/// An empty motif list scores 0.
///
/// # Errors
///
/// [`KmerscopeError::InconsistentLength`] if any motif's length differs from
/// the consensus length; [`KmerscopeError::InvalidSymbol`] for bytes outside
/// `{A, C, G, T}`.
pub fn score<S: AsRef<[u8]>>(motifs: &[S], consensus: &[u8]) -> Result<usize> {
    let consensus = alphabet::normalize(consensus)?;
    let mut total = 0;
    for m in motifs {
        let m = m.as_ref();
        if m.len() != consensus.len() {
            return Err(KmerscopeError::InconsistentLength {
                expected: consensus.len(),
                actual: m.len(),
            });
        }
        total += mismatches(&alphabet::normalize(m)?, &consensus);
    }
    Ok(total)
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn count_matrix_json_round_trip() {
        let counts = count_matrix(&["ACGT", "AGGT"]).unwrap();
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(
            json,
            r#"{"columns":[[2,0,0,0],[0,1,1,0],[0,0,2,0],[0,0,0,2]],"n_motifs":2}"#
        );
        let back: CountMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counts);
    }

    #[test]
    fn zero_width_count_matrix_round_trips() {
        let counts = count_matrix(&["", "", ""]).unwrap();
        let json = serde_json::to_string(&counts).unwrap();
        let back: CountMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back.n_motifs(), 3);
        assert_eq!(back.width(), 0);
    }

    #[test]
    fn count_matrix_with_wrong_total_is_rejected() {
        for json in [
            r#"{"columns":[[1,0,0,0]],"n_motifs":5}"#,
            r#"{"columns":[[1,0,0,0],[1,1,0,0]],"n_motifs":1}"#,
            r#"{"columns":[],"n_motifs":0}"#,
        ] {
            assert!(serde_json::from_str::<CountMatrix>(json).is_err(), "{}", json);
        }
    }

    #[test]
    fn profile_json_round_trip() {
        let profile = count_matrix(&["AC", "AG"]).unwrap().profile().unwrap();
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, "[[1.0,0.0,0.0,0.0],[0.0,0.5,0.5,0.0]]");
        let back: ProfileMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn profile_that_does_not_sum_to_one_is_rejected() {
        for json in [
            "[[0.2,0.0,0.0,0.0]]",
            "[[0.5,0.5,0.5,-0.5]]",
            "[[1.5,-0.5,0.0,0.0]]",
        ] {
            assert!(serde_json::from_str::<ProfileMatrix>(json).is_err(), "{}", json);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn motif_list() -> impl Strategy<Value = Vec<Vec<u8>>> {
        (1usize..=12).prop_flat_map(|width| {
            proptest::collection::vec(
                proptest::collection::vec(
                    prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')],
                    width,
                ),
                1..=15,
            )
        })
    }

    proptest! {
        #[test]
        fn profile_columns_sum_to_one(motifs in motif_list()) {
            let profile = count_matrix(&motifs).unwrap().profile().unwrap();
            for col in profile.columns() {
                let sum: f64 = col.iter().sum();
                prop_assert!((sum - 1.0).abs() < PROFILE_TOLERANCE);
            }
        }

        #[test]
        fn count_columns_sum_to_motif_count(motifs in motif_list()) {
            let counts = count_matrix(&motifs).unwrap();
            for col in counts.columns() {
                prop_assert_eq!(col.iter().sum::<usize>(), motifs.len());
            }
        }

        #[test]
        fn consensus_minimizes_score(motifs in motif_list()) {
            let set = MotifSet::new(&motifs).unwrap();
            let (cons, best) = set.consensus_score().unwrap();
            // Any single-position change cannot lower the score.
            for pos in 0..cons.len() {
                for &b in &ALPHABET {
                    let mut other = cons.clone();
                    other[pos] = b;
                    prop_assert!(set.score(&other).unwrap() >= best);
                }
            }
        }
    }
}
