//! Similarity tests used to detect a stabilized sampling chain.

use super::abc::Alphabet;
use super::pwm::FrequencyMatrix;

/// The default threshold under which two matrices are considered similar.
///
/// With a pseudocount of one and five motif instances, swapping a single
/// base of one instance moves the distance by about `0.22`.
pub const DEFAULT_EPSILON: f64 = 0.5;

/// Check whether two motif strings are identical.
#[inline]
pub fn motifs_similar(a: &str, b: &str) -> bool {
    a == b
}

/// Check whether two matrices differ by at most `epsilon`.
///
/// The distance is the sum of absolute differences over every cell, see
/// [`FrequencyMatrix::distance`]. Matrices of different lengths are never
/// similar.
#[inline]
pub fn pwms_similar<A: Alphabet>(
    a: &FrequencyMatrix<A>,
    b: &FrequencyMatrix<A>,
    epsilon: f64,
) -> bool {
    a.distance(b) <= epsilon
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;

    use crate::abc::Dna;
    use crate::abc::Pseudocounts;
    use crate::pwm::calc_pwm;
    use crate::seq::EncodedSequence;

    fn pwm(seqs: &[&str]) -> FrequencyMatrix<Dna> {
        let instances = seqs
            .iter()
            .map(|s| EncodedSequence::<Dna>::from_str(s).unwrap())
            .collect::<Vec<_>>();
        calc_pwm(&instances, &Pseudocounts::from(1.0)).unwrap()
    }

    #[test]
    fn test_pwms_similar() {
        let base = pwm(&["GTAA", "ACGT", "GCGT", "ACAT", "GCGA"]);
        let small = pwm(&["ATAA", "ACGT", "GCGT", "ACAT", "GCGA"]);
        let big = pwm(&["GTTA", "ATGT", "GCAT", "TCAT", "CCGC"]);
        assert!(pwms_similar(&base, &base, DEFAULT_EPSILON));
        assert!(pwms_similar(&base, &small, DEFAULT_EPSILON));
        assert!(!pwms_similar(&base, &big, DEFAULT_EPSILON));
    }

    #[test]
    fn test_pwms_similar_epsilon() {
        let base = pwm(&["GTAA", "ACGT", "GCGT", "ACAT", "GCGA"]);
        let small = pwm(&["ATAA", "ACGT", "GCGT", "ACAT", "GCGA"]);
        assert!(pwms_similar(&base, &base, 0.0));
        assert!(!pwms_similar(&base, &small, 0.1));
        assert!(pwms_similar(&base, &small, 0.3));
    }

    #[test]
    fn test_pwms_similar_different_lengths() {
        let a = pwm(&["ACGT", "ACGT"]);
        let b = pwm(&["ACG", "ACG"]);
        assert!(!pwms_similar(&a, &b, 100.0));
    }

    #[test]
    fn test_motifs_similar() {
        assert!(motifs_similar("ACGT", "ACGT"));
        assert!(!motifs_similar("ACGT", "GCGT"));
    }
}
