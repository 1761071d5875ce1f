//! GC skew along a genome.

use kmerscope_core::Result;

use crate::alphabet;

/// Running `#G - #C`, one entry per base.
///
/// Entry `i` covers `genome[..=i]`; there is no leading zero.
///
/// # Errors
///
/// Returns an error for bytes outside `{A, C, G, T}`.
pub fn skew(genome: &[u8]) -> Result<Vec<i64>> {
    let genome = alphabet::normalize(genome)?;
    let mut running = 0i64;
    Ok(genome
        .iter()
        .map(|&b| {
            match b {
                b'G' => running += 1,
                b'C' => running -= 1,
                _ => {}
            }
            running
        })
        .collect())
}

/// Indices into [`skew`] where it reaches its minimum, ascending.
///
/// Empty for an empty genome.
pub fn minimum_skew(genome: &[u8]) -> Result<Vec<usize>> {
    let values = skew(genome)?;
    let Some(&min) = values.iter().min() else {
        return Ok(Vec::new());
    };
    Ok(values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == min)
        .map(|(i, _)| i)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_skew() {
        assert_eq!(skew(b"CATGGGCATCGGCCATACGCC").unwrap()[..6], [-1, -1, -1, 0, 1, 2]);
        assert_eq!(skew(b"gcAT").unwrap(), vec![1, 0, 0, 0]);
    }

    #[test]
    fn minimum_positions() {
        // skew: -1 -2 -1 -2 -1
        assert_eq!(minimum_skew(b"CCGCG").unwrap(), vec![1, 3]);
        assert_eq!(minimum_skew(b"AAAA").unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_genome() {
        assert!(skew(b"").unwrap().is_empty());
        assert!(minimum_skew(b"").unwrap().is_empty());
    }

    #[test]
    fn invalid_symbol() {
        assert!(skew(b"GCN").is_err());
    }
}
