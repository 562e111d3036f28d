//! Encoded sequences and the records sampled by the motif search.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Index;
use std::str::FromStr;

use rand::Rng;

use super::abc::Alphabet;
use super::abc::Dna;
use super::abc::Symbol;
use super::err::ConfigurationError;
use super::err::ConstructionError;
use super::err::Error;
use super::err::InvalidSymbol;

// --- EncodedSequence ---------------------------------------------------------

/// A biological sequence encoded with an alphabet.
#[derive(Clone, Debug)]
pub struct EncodedSequence<A: Alphabet> {
    alphabet: std::marker::PhantomData<A>,
    data: Vec<A::Symbol>,
}

impl<A: Alphabet> EncodedSequence<A> {
    /// Create a new encoded sequence.
    pub fn new(data: Vec<A::Symbol>) -> Self {
        Self {
            data,
            alphabet: std::marker::PhantomData,
        }
    }

    /// Create a new encoded sequence from a textual representation.
    pub fn encode(sequence: &str) -> Result<Self, InvalidSymbol> {
        sequence
            .chars()
            .map(A::Symbol::from_char)
            .collect::<Result<_, _>>()
            .map(Self::new)
    }

    /// Return the number of symbols in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the symbols in the sequence.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, A::Symbol> {
        self.data.iter()
    }

    /// Iterate over every contiguous window of the given width.
    #[inline]
    pub fn windows(&self, width: usize) -> std::slice::Windows<'_, A::Symbol> {
        self.data.windows(width)
    }
}

impl<A: Alphabet> AsRef<EncodedSequence<A>> for EncodedSequence<A> {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl<A: Alphabet> AsRef<[<A as Alphabet>::Symbol]> for EncodedSequence<A> {
    fn as_ref(&self) -> &[<A as Alphabet>::Symbol] {
        self.data.as_slice()
    }
}

impl<A: Alphabet> Default for EncodedSequence<A> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<A: Alphabet> Display for EncodedSequence<A> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for c in self.data.iter() {
            write!(f, "{}", c.as_char())?;
        }
        Ok(())
    }
}

impl<A: Alphabet> FromStr for EncodedSequence<A> {
    type Err = InvalidSymbol;
    fn from_str(seq: &str) -> Result<Self, Self::Err> {
        Self::encode(seq)
    }
}

impl<A: Alphabet> From<Vec<A::Symbol>> for EncodedSequence<A> {
    fn from(data: Vec<A::Symbol>) -> Self {
        Self::new(data)
    }
}

impl<A: Alphabet> From<&[A::Symbol]> for EncodedSequence<A> {
    fn from(data: &[A::Symbol]) -> Self {
        Self::new(data.to_vec())
    }
}

impl<A: Alphabet> Index<usize> for EncodedSequence<A> {
    type Output = A::Symbol;
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a, A: Alphabet> IntoIterator for &'a EncodedSequence<A> {
    type Item = &'a A::Symbol;
    type IntoIter = std::slice::Iter<'a, A::Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<A, S> PartialEq<S> for EncodedSequence<A>
where
    A: Alphabet,
    S: AsRef<[<A as Alphabet>::Symbol]>,
{
    fn eq(&self, other: &S) -> bool {
        let l = self.data.as_slice();
        let r = other.as_ref();
        l == r
    }
}

// --- SequenceRecord ----------------------------------------------------------

/// A named sequence together with its candidate motif windows.
///
/// The record stores every contiguous window of `width` symbols, in order
/// of their start position, and the index of the window currently selected
/// as the motif occurrence for this sequence.
#[derive(Clone, Debug)]
pub struct SequenceRecord<A: Alphabet = Dna> {
    name: String,
    sequence: EncodedSequence<A>,
    width: usize,
    instances: Vec<EncodedSequence<A>>,
    current: usize,
}

impl<A: Alphabet> SequenceRecord<A> {
    /// Create a new record from a textual sequence.
    ///
    /// The initial motif window is drawn uniformly at random from the
    /// `rng` among the `len - width + 1` candidate windows.
    pub fn new<N, R>(name: N, sequence: &str, width: usize, rng: &mut R) -> Result<Self, Error>
    where
        N: Into<String>,
        R: Rng + ?Sized,
    {
        let name = name.into();
        match EncodedSequence::encode(sequence) {
            Ok(encoded) => Self::from_encoded(name, encoded, width, rng),
            Err(InvalidSymbol(symbol)) => {
                Err(ConstructionError::InvalidSymbol { name, symbol }.into())
            }
        }
    }

    /// Create a new record from an already encoded sequence.
    pub fn from_encoded<N, R>(
        name: N,
        sequence: EncodedSequence<A>,
        width: usize,
        rng: &mut R,
    ) -> Result<Self, Error>
    where
        N: Into<String>,
        R: Rng + ?Sized,
    {
        let name = name.into();
        if width == 0 {
            return Err(ConfigurationError::InvalidWidth(0).into());
        }
        if sequence.len() < width {
            return Err(ConstructionError::TooShort {
                length: sequence.len(),
                name,
                width,
            }
            .into());
        }
        let instances = sequence
            .windows(width)
            .map(EncodedSequence::from)
            .collect::<Vec<_>>();
        let current = rng.gen_range(0..instances.len());
        Ok(Self {
            name,
            sequence,
            width,
            instances,
            current,
        })
    }

    /// The identifier of the record.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The complete sequence of the record.
    #[inline]
    pub fn sequence(&self) -> &EncodedSequence<A> {
        &self.sequence
    }

    /// The motif width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The length of the complete sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check whether the record sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// All candidate motif windows, in order of their start position.
    #[inline]
    pub fn instances(&self) -> &[EncodedSequence<A>] {
        &self.instances
    }

    /// The currently selected motif window.
    #[inline]
    pub fn current_instance(&self) -> &EncodedSequence<A> {
        &self.instances[self.current]
    }

    /// The start position of the currently selected motif window.
    #[inline]
    pub fn current_start(&self) -> usize {
        self.current
    }

    /// Select a new motif window.
    ///
    /// Returns `false` and leaves the record untouched if `start` is not a
    /// valid window start.
    pub fn set_current_start(&mut self, start: usize) -> bool {
        if start < self.instances.len() {
            self.current = start;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    use crate::abc::Nucleotide::*;

    #[test]
    fn test_encode() {
        let seq = EncodedSequence::<Dna>::from_str("ACGTtg").unwrap();
        assert_eq!(seq, [A, C, G, T, T, G]);
        assert_eq!(seq.to_string(), "ACGTTG");
        assert!(EncodedSequence::<Dna>::encode("ACNT").is_err());
    }

    #[test]
    fn test_record_instances() {
        let mut rng = StdRng::seed_from_u64(42);
        let record = SequenceRecord::<Dna>::new("seq1", "ACGTAC", 4, &mut rng).unwrap();
        assert_eq!(record.name(), "seq1");
        assert_eq!(record.width(), 4);
        assert_eq!(record.instances().len(), 3);
        let windows = record
            .instances()
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>();
        assert_eq!(windows, vec!["ACGT", "CGTA", "GTAC"]);
        assert!(record.current_start() < 3);
        assert_eq!(
            record.current_instance(),
            &record.instances()[record.current_start()]
        );
    }

    #[test]
    fn test_record_single_window() {
        let mut rng = StdRng::seed_from_u64(1);
        let record = SequenceRecord::<Dna>::new("exact", "ACGT", 4, &mut rng).unwrap();
        assert_eq!(record.instances().len(), 1);
        assert_eq!(record.current_start(), 0);
    }

    #[test]
    fn test_record_too_short() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = SequenceRecord::<Dna>::new("short_seq", "AGCT", 10, &mut rng).unwrap_err();
        assert_eq!(
            err,
            Error::Construction(ConstructionError::TooShort {
                name: String::from("short_seq"),
                length: 4,
                width: 10,
            })
        );
    }

    #[test]
    fn test_record_invalid_symbol() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = SequenceRecord::<Dna>::new("bad", "ACGNT", 2, &mut rng).unwrap_err();
        assert_eq!(
            err,
            Error::Construction(ConstructionError::InvalidSymbol {
                name: String::from("bad"),
                symbol: 'N',
            })
        );
    }

    #[test]
    fn test_record_zero_width() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = SequenceRecord::<Dna>::new("seq", "ACGT", 0, &mut rng).unwrap_err();
        assert_eq!(
            err,
            Error::Configuration(ConfigurationError::InvalidWidth(0))
        );
    }

    #[test]
    fn test_set_current_start() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut record = SequenceRecord::<Dna>::new("seq", "ACGTAC", 2, &mut rng).unwrap();
        assert!(record.set_current_start(4));
        assert_eq!(record.current_instance().to_string(), "AC");
        assert!(!record.set_current_start(5));
        assert_eq!(record.current_start(), 4);
    }
}
