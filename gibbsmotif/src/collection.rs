//! Collections of sequence records and their current motif windows.

use std::ops::Index;

use rand::Rng;

use super::abc::Alphabet;
use super::abc::Background;
use super::abc::Dna;
use super::err::ConfigurationError;
use super::err::Error;
use super::seq::EncodedSequence;
use super::seq::SequenceRecord;

// --- SequenceCollection ------------------------------------------------------

/// An ordered collection of records sharing a single motif width.
#[derive(Clone, Debug)]
pub struct SequenceCollection<A: Alphabet = Dna> {
    records: Vec<SequenceRecord<A>>,
    width: usize,
}

impl<A: Alphabet> SequenceCollection<A> {
    /// Create a new collection from already built records.
    ///
    /// At least two records are required, and they must all have been
    /// built with the same motif width.
    pub fn new(records: Vec<SequenceRecord<A>>) -> Result<Self, ConfigurationError> {
        if records.len() < 2 {
            return Err(ConfigurationError::TooFewSequences(records.len()));
        }
        let width = records[0].width();
        if records.iter().any(|r| r.width() != width) {
            return Err(ConfigurationError::MixedWidths);
        }
        Ok(Self { records, width })
    }

    /// Build a collection from named textual sequences.
    ///
    /// The number of sequences is checked before any record is built, so
    /// a single sequence is reported as such even if it is too short.
    pub fn from_sequences<I, N, S, R>(sequences: I, width: usize, rng: &mut R) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let sequences = sequences.into_iter().collect::<Vec<_>>();
        if sequences.len() < 2 {
            return Err(ConfigurationError::TooFewSequences(sequences.len()).into());
        }
        let records = sequences
            .into_iter()
            .map(|(name, seq)| SequenceRecord::new(name, seq.as_ref(), width, rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(records)?)
    }

    /// The number of records in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The motif width shared by all records.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Iterate over the records of the collection.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, SequenceRecord<A>> {
        self.records.iter()
    }

    /// The records of the collection.
    #[inline]
    pub fn records(&self) -> &[SequenceRecord<A>] {
        &self.records
    }

    /// Gather the current window of every record.
    pub fn motif_state(&self) -> MotifState {
        MotifState::new(self.records.iter().map(|r| r.current_start()).collect())
    }

    /// Draw a new state with one uniformly random window per record.
    pub fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> MotifState {
        MotifState::new(
            self.records
                .iter()
                .map(|r| rng.gen_range(0..r.instances().len()))
                .collect(),
        )
    }

    /// Compute the background frequencies over every complete sequence.
    pub fn background(&self) -> Result<Background<A>, ConfigurationError> {
        Background::from_sequences(self.records.iter().map(|r| r.sequence()))
    }
}

impl<A: Alphabet> Index<usize> for SequenceCollection<A> {
    type Output = SequenceRecord<A>;
    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl<'a, A: Alphabet> IntoIterator for &'a SequenceCollection<A> {
    type Item = &'a SequenceRecord<A>;
    type IntoIter = std::slice::Iter<'a, SequenceRecord<A>>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// --- MotifState --------------------------------------------------------------

/// The start position of the selected motif window of every record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MotifState {
    starts: Vec<usize>,
}

impl MotifState {
    /// Create a new state from a list of window starts.
    pub fn new(starts: Vec<usize>) -> Self {
        Self { starts }
    }

    /// The number of records covered by the state.
    #[inline]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    /// Check whether the state is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// The window starts, in record order.
    #[inline]
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// The window start of the `i`-th record.
    #[inline]
    pub fn start(&self, i: usize) -> usize {
        self.starts[i]
    }

    /// Replace the window start of the `i`-th record.
    #[inline]
    pub fn set(&mut self, i: usize, start: usize) {
        self.starts[i] = start;
    }

    /// Check whether the state selects a valid window of every record.
    pub fn matches<A: Alphabet>(&self, collection: &SequenceCollection<A>) -> bool {
        self.starts.len() == collection.len()
            && self
                .starts
                .iter()
                .zip(collection.iter())
                .all(|(&s, r)| s < r.instances().len())
    }

    /// Materialize the selected windows of the collection.
    pub fn instances<'c, A: Alphabet>(
        &self,
        collection: &'c SequenceCollection<A>,
    ) -> Vec<&'c EncodedSequence<A>> {
        self.starts
            .iter()
            .zip(collection.iter())
            .map(|(&s, r)| &r.instances()[s])
            .collect()
    }

    /// Render the selected windows of the collection as strings.
    pub fn motifs<A: Alphabet>(&self, collection: &SequenceCollection<A>) -> Vec<String> {
        self.instances(collection)
            .into_iter()
            .map(|x| x.to_string())
            .collect()
    }

    /// List the records whose window differs between two states.
    pub fn differences(&self, other: &MotifState) -> Vec<usize> {
        self.starts
            .iter()
            .zip(other.starts.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect()
    }
}

impl From<Vec<usize>> for MotifState {
    fn from(starts: Vec<usize>) -> Self {
        Self::new(starts)
    }
}

impl AsRef<[usize]> for MotifState {
    fn as_ref(&self) -> &[usize] {
        &self.starts
    }
}
