//! Digital encoding for biological sequences using an alphabet.

use std::fmt::Debug;

use generic_array::sequence::GenericSequence;
use generic_array::ArrayLength;
use generic_array::GenericArray;
use typenum::consts::U4;
use typenum::marker_traits::NonZero;
use typenum::marker_traits::Unsigned;

use super::err::ConfigurationError;
use super::err::InvalidData;
use super::err::InvalidSymbol;

// --- Symbol ------------------------------------------------------------------

/// A symbol from a biological alphabet.
pub trait Symbol: Sized + Copy + Eq + Debug {
    /// View this symbol as a zero-based index.
    fn as_index(&self) -> usize;
    /// View this symbol as a string character.
    fn as_char(&self) -> char {
        self.as_ascii() as char
    }
    /// Parse a string character into a symbol.
    fn from_char(c: char) -> Result<Self, InvalidSymbol> {
        if c.is_ascii() {
            Self::from_ascii(c as u8)
        } else {
            Err(InvalidSymbol(c))
        }
    }
    /// View this symbol as an ASCII charater.
    fn as_ascii(&self) -> u8;
    /// Parse an ASCII character into a symbol.
    fn from_ascii(c: u8) -> Result<Self, InvalidSymbol>;
}

// --- Alphabet ----------------------------------------------------------------

/// A biological alphabet with associated metadata.
pub trait Alphabet: Debug + Copy + Default + 'static {
    type Symbol: Symbol;
    type K: Unsigned + NonZero + ArrayLength + Debug;

    /// Get all the symbols of this alphabet, sorted by index.
    fn symbols() -> &'static [Self::Symbol];

    /// Get a string with all symbols from this alphabet.
    fn as_str() -> &'static str;
}

// --- DNA ---------------------------------------------------------------------

/// The DNA alphabet composed of the 4 deoxyribonucleotides.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dna;

impl Alphabet for Dna {
    type Symbol = Nucleotide;
    type K = U4;

    fn symbols() -> &'static [Nucleotide] {
        &[Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T]
    }

    fn as_str() -> &'static str {
        "ACGT"
    }
}

/// A deoxyribonucleotide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Nucleotide {
    /// Adenine.
    A = 0,
    /// Cytosine.
    C = 1,
    /// Guanine.
    G = 2,
    /// Thymine.
    T = 3,
}

impl From<Nucleotide> for char {
    fn from(n: Nucleotide) -> char {
        n.as_char()
    }
}

impl Symbol for Nucleotide {
    fn as_index(&self) -> usize {
        *self as usize
    }

    fn as_ascii(&self) -> u8 {
        match self {
            Nucleotide::A => b'A',
            Nucleotide::C => b'C',
            Nucleotide::G => b'G',
            Nucleotide::T => b'T',
        }
    }

    fn from_ascii(c: u8) -> Result<Self, InvalidSymbol> {
        match c {
            b'A' | b'a' => Ok(Nucleotide::A),
            b'C' | b'c' => Ok(Nucleotide::C),
            b'G' | b'g' => Ok(Nucleotide::G),
            b'T' | b't' => Ok(Nucleotide::T),
            _ => Err(InvalidSymbol(c as char)),
        }
    }
}

// --- Background --------------------------------------------------------------

/// The background frequencies for an alphabet.
#[derive(Clone, Debug, PartialEq)]
pub struct Background<A: Alphabet> {
    frequencies: GenericArray<f64, A::K>,
    alphabet: std::marker::PhantomData<A>,
}

impl<A: Alphabet> Background<A> {
    /// Create a new background with the given frequencies.
    ///
    /// The array must contain valid frequencies, i.e. real numbers between
    /// zero and one that sum to one.
    pub fn new<F>(frequencies: F) -> Result<Self, InvalidData>
    where
        F: Into<GenericArray<f64, A::K>>,
    {
        let frequencies = frequencies.into();
        let mut sum = 0.0;
        for &f in frequencies.iter() {
            if !(0.0..=1.0).contains(&f) {
                return Err(InvalidData);
            }
            sum += f;
        }
        if (sum - 1.0).abs() > 1e-6 {
            return Err(InvalidData);
        }
        Ok(Self {
            frequencies,
            alphabet: std::marker::PhantomData,
        })
    }

    /// Create a new background from raw symbol counts.
    ///
    /// Symbols that were never observed get a frequency of exactly zero.
    pub fn from_counts(counts: &GenericArray<usize, A::K>) -> Result<Self, ConfigurationError> {
        let total: usize = counts.iter().sum();
        if total == 0 {
            return Err(ConfigurationError::EmptyCollection);
        }
        let frequencies = GenericArray::generate(|i| counts[i] as f64 / total as f64);
        Ok(Self {
            frequencies,
            alphabet: std::marker::PhantomData,
        })
    }

    /// Create a new background from the symbols of complete sequences.
    ///
    /// # Example
    /// ```
    /// # use gibbsmotif::abc::*;
    /// # use gibbsmotif::seq::EncodedSequence;
    /// let seqs = ["AACG", "TTAA"].map(|s| EncodedSequence::<Dna>::encode(s).unwrap());
    /// let bg = Background::<Dna>::from_sequences(&seqs).unwrap();
    /// assert_eq!(bg.frequencies(), &[0.5, 0.125, 0.125, 0.25]);
    /// ```
    pub fn from_sequences<I>(sequences: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<[A::Symbol]>,
    {
        let mut counts = GenericArray::<usize, A::K>::default();
        for seq in sequences {
            for symbol in seq.as_ref() {
                counts[symbol.as_index()] += 1;
            }
        }
        Self::from_counts(&counts)
    }

    /// Create a new background with uniform frequencies.
    ///
    /// # Example
    /// ```
    /// # use gibbsmotif::abc::*;
    /// let bg = Background::<Dna>::uniform();
    /// assert_eq!(bg.frequencies(), &[0.25, 0.25, 0.25, 0.25]);
    /// ```
    pub fn uniform() -> Self {
        let frequencies = GenericArray::generate(|_| 1.0 / A::K::USIZE as f64);
        Self {
            frequencies,
            alphabet: std::marker::PhantomData,
        }
    }

    /// A reference to the raw background frequencies.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// The background frequency of a single symbol.
    #[inline]
    pub fn frequency(&self, symbol: A::Symbol) -> f64 {
        self.frequencies[symbol.as_index()]
    }
}

impl<A: Alphabet> AsRef<[f64]> for Background<A> {
    fn as_ref(&self) -> &[f64] {
        self.frequencies()
    }
}

impl<A: Alphabet> Default for Background<A> {
    fn default() -> Self {
        Self::uniform()
    }
}

// --- Pseudocounts ------------------------------------------------------------

/// A structure for storing the pseudocounts over an alphabet.
#[derive(Clone, Debug, PartialEq)]
pub struct Pseudocounts<A: Alphabet> {
    counts: GenericArray<f64, A::K>,
    alphabet: std::marker::PhantomData<A>,
}

impl<A: Alphabet> Pseudocounts<A> {
    /// The pseudocount added for each symbol, in alphabet order.
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }
}

impl<A: Alphabet> Default for Pseudocounts<A> {
    fn default() -> Self {
        Self::from(1.0)
    }
}

impl<A: Alphabet> From<GenericArray<f64, A::K>> for Pseudocounts<A> {
    fn from(counts: GenericArray<f64, A::K>) -> Self {
        Self {
            alphabet: std::marker::PhantomData,
            counts,
        }
    }
}

impl<A: Alphabet> From<f64> for Pseudocounts<A> {
    fn from(count: f64) -> Self {
        Self {
            counts: GenericArray::generate(|_| count),
            alphabet: std::marker::PhantomData,
        }
    }
}

impl<A: Alphabet> AsRef<[f64]> for Pseudocounts<A> {
    fn as_ref(&self) -> &[f64] {
        &self.counts
    }
}
