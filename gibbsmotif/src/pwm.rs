//! Count, frequency and weight matrices built from motif instances.

use std::fmt::Display;
use std::fmt::Formatter;

use super::abc::Alphabet;
use super::abc::Background;
use super::abc::Pseudocounts;
use super::abc::Symbol;
use super::dense::DenseMatrix;
use super::err::ConfigurationError;
use super::err::InvalidData;
use super::seq::EncodedSequence;

// --- CountMatrix -------------------------------------------------------------

/// A matrix storing symbol occurences at each position.
#[derive(Clone, Debug, PartialEq)]
pub struct CountMatrix<A: Alphabet> {
    /// The alphabet of the count matrix.
    alphabet: std::marker::PhantomData<A>,
    /// The actual counts for each position of the motif.
    data: DenseMatrix<u32, A::K>,
    /// The number of sequences from which this count matrix was obtained.
    n: u32,
}

impl<A: Alphabet> CountMatrix<A> {
    /// Create a new count matrix without checking the contents.
    fn new_unchecked(data: DenseMatrix<u32, A::K>, n: u32) -> Self {
        Self {
            alphabet: std::marker::PhantomData,
            n,
            data,
        }
    }

    /// Create a new count matrix from the given data.
    ///
    /// The matrix must contain count data, for sequences of the same
    /// length, i.e. rows should all sum to the same value.
    pub fn new(data: DenseMatrix<u32, A::K>) -> Result<Self, InvalidData> {
        let mut sums = data.iter().map(|row| row.iter().sum::<u32>());
        match sums.next() {
            // Empty matrices contain valid data.
            None => Ok(Self::new_unchecked(data, 0)),
            Some(n) if sums.all(|s| s == n) => Ok(Self::new_unchecked(data, n)),
            Some(_) => Err(InvalidData),
        }
    }

    /// Create a new count matrix from the given sequences.
    ///
    /// All sequences must have the same length, which becomes the length
    /// of the motif.
    pub fn from_sequences<I>(sequences: I) -> Result<Self, InvalidData>
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<[A::Symbol]>,
    {
        let mut n = 0;
        let mut data: Option<DenseMatrix<u32, A::K>> = None;
        for seq in sequences {
            let seq = seq.as_ref();
            let d = data.get_or_insert_with(|| DenseMatrix::new(seq.len()));
            if seq.len() != d.rows() {
                return Err(InvalidData);
            }
            for (i, x) in seq.iter().enumerate() {
                d[i][x.as_index()] += 1;
            }
            n += 1;
        }
        match data {
            None => Ok(Self::new_unchecked(DenseMatrix::new(0), n)),
            Some(matrix) => Ok(Self::new_unchecked(matrix, n)),
        }
    }

    /// Build a probability matrix from this count matrix using pseudo-counts.
    pub fn to_freq<P>(&self, pseudo: P) -> FrequencyMatrix<A>
    where
        P: Into<Pseudocounts<A>>,
    {
        let p = pseudo.into();
        let mut probas = DenseMatrix::new(self.data.rows());
        for i in 0..self.data.rows() {
            let src = &self.data[i];
            let dst = &mut probas[i];
            for (j, &x) in src.iter().enumerate() {
                dst[j] = x as f64 + p.counts()[j];
            }
            let s: f64 = dst.iter().sum();
            for x in dst.iter_mut() {
                *x /= s;
            }
        }
        FrequencyMatrix {
            alphabet: std::marker::PhantomData,
            data: probas,
        }
    }

    /// The raw counts from the count matrix.
    #[inline]
    pub fn counts(&self) -> &DenseMatrix<u32, A::K> {
        &self.data
    }

    /// The length of the motif.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.rows()
    }

    /// Check whether the count matrix has no position.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.rows() == 0
    }

    /// The number of sequences the matrix was built from.
    #[inline]
    pub fn sequences(&self) -> u32 {
        self.n
    }
}

impl<A: Alphabet> AsRef<DenseMatrix<u32, A::K>> for CountMatrix<A> {
    fn as_ref(&self) -> &DenseMatrix<u32, A::K> {
        &self.data
    }
}

// --- FrequencyMatrix ---------------------------------------------------------

/// A matrix storing symbol frequencies at each position.
///
/// This is the position weight matrix sampled by the Gibbs sampler: one
/// probability distribution over the alphabet for every motif position.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyMatrix<A: Alphabet> {
    alphabet: std::marker::PhantomData<A>,
    data: DenseMatrix<f64, A::K>,
}

impl<A: Alphabet> FrequencyMatrix<A> {
    /// The length of the motif encoded in this frequency matrix.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.rows()
    }

    /// Check whether the frequency matrix has no position.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.rows() == 0
    }

    /// The raw frequencies, one row per motif position.
    #[inline]
    pub fn matrix(&self) -> &DenseMatrix<f64, A::K> {
        &self.data
    }

    /// The frequency of `symbol` at the given motif position.
    #[inline]
    pub fn get(&self, symbol: A::Symbol, position: usize) -> f64 {
        self.data[position][symbol.as_index()]
    }

    /// The distribution over the alphabet at the given motif position.
    #[inline]
    pub fn column(&self, position: usize) -> &[f64] {
        &self.data[position]
    }

    /// Convert to a weight matrix using the given background frequencies.
    pub fn to_weight(&self, background: &Background<A>) -> WeightMatrix<A> {
        let mut weight = DenseMatrix::new(self.data.rows());
        for (src, dst) in self.data.iter().zip(weight.iter_mut()) {
            for (j, (&x, &f)) in src.iter().zip(background.frequencies()).enumerate() {
                dst[j] = x / f;
            }
        }
        WeightMatrix {
            alphabet: std::marker::PhantomData,
            data: weight,
        }
    }

    /// Get the consensus sequence of the matrix.
    ///
    /// Each position gets the symbol with the highest frequency, the
    /// first symbol of the alphabet winning ties.
    pub fn consensus(&self) -> EncodedSequence<A> {
        let symbols = A::symbols();
        self.data
            .iter()
            .map(|row| {
                let mut best = 0;
                for (j, &x) in row.iter().enumerate() {
                    if x > row[best] {
                        best = j;
                    }
                }
                symbols[best]
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Compute the sum of absolute differences between two matrices.
    ///
    /// Matrices of different lengths are infinitely distant.
    pub fn distance(&self, other: &Self) -> f64 {
        if self.len() != other.len() {
            return f64::INFINITY;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .flat_map(|(r1, r2)| r1.iter().zip(r2.iter()))
            .map(|(x, y)| (x - y).abs())
            .sum()
    }
}

impl<A: Alphabet> AsRef<DenseMatrix<f64, A::K>> for FrequencyMatrix<A> {
    fn as_ref(&self) -> &DenseMatrix<f64, A::K> {
        &self.data
    }
}

impl<A: Alphabet> Display for FrequencyMatrix<A> {
    /// Format as one tab-separated line per symbol.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, symbol) in A::symbols().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", symbol.as_char())?;
            for x in self.data.column(symbol.as_index()) {
                write!(f, "\t{:.3}", x)?;
            }
        }
        Ok(())
    }
}

// --- WeightMatrix ------------------------------------------------------------

/// A matrix storing odds ratio of symbol occurences at each position.
#[derive(Clone, Debug)]
pub struct WeightMatrix<A: Alphabet> {
    alphabet: std::marker::PhantomData<A>,
    data: DenseMatrix<f64, A::K>,
}

impl<A: Alphabet> WeightMatrix<A> {
    /// The length of the motif encoded in this weight matrix.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.rows()
    }

    /// Check whether the weight matrix has no position.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.rows() == 0
    }

    /// Compute the log-likelihood ratio of a window under the motif model.
    ///
    /// The window must have the same length as the matrix; the result is
    /// the sum of the logarithms of the odds ratios of each symbol at its
    /// position, so that long windows neither overflow nor underflow.
    pub fn log_score<S>(&self, window: S) -> f64
    where
        S: AsRef<[A::Symbol]>,
    {
        window
            .as_ref()
            .iter()
            .zip(self.data.iter())
            .map(|(s, row)| row[s.as_index()].ln())
            .sum()
    }
}

impl<A: Alphabet> AsRef<DenseMatrix<f64, A::K>> for WeightMatrix<A> {
    fn as_ref(&self) -> &DenseMatrix<f64, A::K> {
        &self.data
    }
}

// --- calc_pwm ----------------------------------------------------------------

/// Build a position weight matrix from a set of motif instances.
///
/// Symbols are counted at every position, `pseudocounts` are added to every
/// count, and each position is normalized to sum to one.
pub fn calc_pwm<A, I>(
    instances: I,
    pseudocounts: &Pseudocounts<A>,
) -> Result<FrequencyMatrix<A>, ConfigurationError>
where
    A: Alphabet,
    I: IntoIterator,
    <I as IntoIterator>::Item: AsRef<[A::Symbol]>,
{
    let counts =
        CountMatrix::<A>::from_sequences(instances).map_err(|_| ConfigurationError::MixedWidths)?;
    if counts.sequences() == 0 {
        return Err(ConfigurationError::EmptyInstances);
    }
    Ok(counts.to_freq(pseudocounts.clone()))
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;

    use crate::abc::Dna;
    use crate::abc::Nucleotide;

    fn encode_all(seqs: &[&str]) -> Vec<EncodedSequence<Dna>> {
        seqs.iter()
            .map(|s| EncodedSequence::from_str(s).unwrap())
            .collect()
    }

    #[test]
    fn test_count_matrix() {
        let seqs = encode_all(&["GTAA", "ACGT", "GCGT", "ACAT", "GCGA"]);
        let counts = CountMatrix::<Dna>::from_sequences(&seqs).unwrap();
        assert_eq!(counts.len(), 4);
        assert_eq!(counts.sequences(), 5);
        // A C G T
        assert_eq!(&counts.counts()[0], &[2, 0, 3, 0]);
        assert_eq!(&counts.counts()[1], &[0, 4, 0, 1]);
        assert_eq!(&counts.counts()[2], &[2, 0, 3, 0]);
        assert_eq!(&counts.counts()[3], &[2, 0, 0, 3]);
    }

    #[test]
    fn test_count_matrix_mixed_lengths() {
        let seqs = encode_all(&["ACGT", "ACG"]);
        assert!(CountMatrix::<Dna>::from_sequences(&seqs).is_err());
    }

    #[test]
    fn test_count_matrix_new() {
        let ok = DenseMatrix::from_rows([[1, 0, 1, 0], [0, 2, 0, 0]]);
        assert_eq!(CountMatrix::<Dna>::new(ok).unwrap().sequences(), 2);
        let bad = DenseMatrix::from_rows([[1, 0, 1, 0], [0, 3, 0, 0]]);
        assert!(CountMatrix::<Dna>::new(bad).is_err());
    }

    #[test]
    fn test_to_freq_pseudocounts() {
        let seqs = encode_all(&["GTAA", "ACGT", "GCGT", "ACAT", "GCGA"]);
        let pwm = CountMatrix::<Dna>::from_sequences(&seqs)
            .unwrap()
            .to_freq(1.0);
        assert_eq!(pwm.column(0), &[3.0 / 9.0, 1.0 / 9.0, 4.0 / 9.0, 1.0 / 9.0]);
        for i in 0..pwm.len() {
            let s: f64 = pwm.column(i).iter().sum();
            assert!((s - 1.0).abs() < 1e-9);
        }
        assert_eq!(pwm.get(Nucleotide::C, 1), 5.0 / 9.0);
    }

    #[test]
    fn test_calc_pwm_empty() {
        let seqs: Vec<EncodedSequence<Dna>> = Vec::new();
        assert_eq!(
            calc_pwm(&seqs, &Pseudocounts::<Dna>::default()),
            Err(ConfigurationError::EmptyInstances)
        );
    }

    #[test]
    fn test_consensus() {
        let seqs = encode_all(&["GTAA", "ACGT", "GCGT", "ACAT", "GCGA"]);
        let pwm = calc_pwm(&seqs, &Pseudocounts::<Dna>::default()).unwrap();
        assert_eq!(pwm.consensus().to_string(), "GCGT");
    }

    #[test]
    fn test_distance() {
        let p1 = calc_pwm(&encode_all(&["AAAA", "CCCC"]), &Pseudocounts::<Dna>::default()).unwrap();
        let p2 = calc_pwm(&encode_all(&["AAAA", "CCCG"]), &Pseudocounts::<Dna>::default()).unwrap();
        assert_eq!(p1.distance(&p1), 0.0);
        // one cell loses 1/6 and another gains 1/6
        assert!((p1.distance(&p2) - 2.0 / 6.0).abs() < 1e-9);
        let p3 = calc_pwm(&encode_all(&["AAA", "CCC"]), &Pseudocounts::<Dna>::default()).unwrap();
        assert!(p1.distance(&p3).is_infinite());
    }

    #[test]
    fn test_weight_log_score() {
        let seqs = encode_all(&["AC", "AC"]);
        let pwm = calc_pwm(&seqs, &Pseudocounts::<Dna>::default()).unwrap();
        let bg = Background::<Dna>::uniform();
        let weights = pwm.to_weight(&bg);
        assert_eq!(weights.len(), 2);
        // A at position 0 and C at position 1 both have frequency 1/2
        let window = EncodedSequence::<Dna>::from_str("AC").unwrap();
        assert!((weights.log_score(&window) - 4f64.ln()).abs() < 1e-9);
        // G at both positions has frequency 1/6
        let window = EncodedSequence::<Dna>::from_str("GG").unwrap();
        assert!((weights.log_score(&window) - 2.0 * (4f64 / 6.0).ln()).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        let pwm = calc_pwm(&encode_all(&["AC", "AC"]), &Pseudocounts::<Dna>::default()).unwrap();
        let text = pwm.to_string();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "A\t0.500\t0.167");
        assert_eq!(lines[1], "C\t0.167\t0.500");
    }
}
