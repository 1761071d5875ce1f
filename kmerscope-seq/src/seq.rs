//! Validated DNA sequence type.
//!
//! [`DnaSeq`] is a newtype over `Vec<u8>`. Construction uppercases and
//! validates every byte against the four-symbol alphabet, so `Deref<Target=[u8]>`
//! and `as_bytes()` hand out slices the engine can use without re-checking.

use std::fmt;
use std::ops::Deref;

use kmerscope_core::{Sequence, Summarizable};

use crate::alphabet;

/// A validated, uppercase `A/C/G/T` sequence.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DnaSeq {
    data: Vec<u8>,
}

impl DnaSeq {
    /// Create a new validated sequence from raw bytes.
    ///
    /// Input is uppercased; any byte outside `{A, C, G, T}` is an
    /// [`InvalidSymbol`](kmerscope_core::KmerscopeError::InvalidSymbol) error.
    pub fn new(bytes: impl AsRef<[u8]>) -> kmerscope_core::Result<Self> {
        Ok(Self {
            data: alphabet::normalize(bytes.as_ref())?,
        })
    }

    /// Wrap bytes already known to be uppercase `A/C/G/T`.
    pub(crate) fn from_validated(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Consume the sequence and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Return the reverse complement.
    pub fn reverse_complement(&self) -> DnaSeq {
        // rank ^ 0b11 maps A<->T and C<->G.
        let rc = self
            .data
            .iter()
            .rev()
            .filter_map(|&b| alphabet::rank(b))
            .map(|r| alphabet::symbol(r ^ 0b11))
            .collect();
        DnaSeq::from_validated(rc)
    }
}

impl Deref for DnaSeq {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for DnaSeq {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Sequence for DnaSeq {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Summarizable for DnaSeq {
    fn summary(&self) -> String {
        let preview_len = self.data.len().min(20);
        let preview = String::from_utf8_lossy(&self.data[..preview_len]);
        if self.data.len() > 20 {
            format!(
                "{} sequence ({} bp): {}...",
                alphabet::NAME,
                self.data.len(),
                preview
            )
        } else {
            format!(
                "{} sequence ({} bp): {}",
                alphabet::NAME,
                self.data.len(),
                preview
            )
        }
    }
}

impl fmt::Debug for DnaSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(\"{}\")",
            alphabet::NAME,
            String::from_utf8_lossy(&self.data)
        )
    }
}

impl fmt::Display for DnaSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.data))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DnaSeq {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let s = std::str::from_utf8(&self.data).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DnaSeq {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}
