//! Error types for sequence construction and sampler configuration.

use std::fmt::Display;
use std::fmt::Formatter;

/// The given character is not a valid symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSymbol(pub char);

impl Display for InvalidSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid symbol: {:?}", self.0)
    }
}

impl std::error::Error for InvalidSymbol {}

/// Invalid data was passed to initialize the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidData;

impl Display for InvalidData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid data")
    }
}

impl std::error::Error for InvalidData {}

// --- ConfigurationError ------------------------------------------------------

/// A run parameter or an input collection is unusable.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The motif width is not strictly positive.
    InvalidWidth(i64),
    /// The iteration budget is not strictly positive.
    InvalidIterations(i64),
    /// Less than two sequences were given.
    TooFewSequences(usize),
    /// Background frequencies were requested for an empty collection.
    EmptyCollection,
    /// A weight matrix was requested for an empty set of motif instances.
    EmptyInstances,
    /// Motif instances or records disagree on the motif width.
    MixedWidths,
    /// The pseudocount is not a finite positive number.
    InvalidPseudocount(f64),
    /// The convergence threshold is not a finite non-negative number.
    InvalidEpsilon(f64),
    /// No sampling chain was requested.
    InvalidRestarts,
    /// A motif state does not describe the windows of a collection.
    InvalidState,
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::InvalidWidth(w) => {
                write!(f, "width {} must be greater than 0.", w)
            }
            ConfigurationError::InvalidIterations(n) => {
                write!(f, "num_iter {} must be greater than 0.", n)
            }
            ConfigurationError::TooFewSequences(_) => {
                f.write_str("Error: More than 1 sequence must be provided.")
            }
            ConfigurationError::EmptyCollection => {
                f.write_str("cannot compute background frequencies of an empty collection.")
            }
            ConfigurationError::EmptyInstances => {
                f.write_str("cannot build a weight matrix without motif instances.")
            }
            ConfigurationError::MixedWidths => {
                f.write_str("all motif instances must share the same width.")
            }
            ConfigurationError::InvalidPseudocount(p) => {
                write!(f, "pseudocount {} must be a positive number.", p)
            }
            ConfigurationError::InvalidEpsilon(e) => {
                write!(f, "epsilon {} must be a non-negative number.", e)
            }
            ConfigurationError::InvalidRestarts => {
                f.write_str("restarts must be greater than 0.")
            }
            ConfigurationError::InvalidState => {
                f.write_str("motif state does not match the sequence collection.")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

// --- ConstructionError -------------------------------------------------------

/// A sequence record could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The sequence is shorter than the motif width.
    TooShort {
        name: String,
        length: usize,
        width: usize,
    },
    /// The sequence contains a character outside of the alphabet.
    InvalidSymbol { name: String, symbol: char },
}

impl Display for ConstructionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstructionError::TooShort {
                name,
                length,
                width,
            } => write!(
                f,
                "sequence {} of length {} is shorter than the motif width {}.",
                name, length, width
            ),
            ConstructionError::InvalidSymbol { name, symbol } => {
                write!(f, "sequence {} contains invalid symbol {:?}.", name, symbol)
            }
        }
    }
}

impl std::error::Error for ConstructionError {}

// --- Error -------------------------------------------------------------------

/// Any error raised while building the inputs of a sampling run.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Configuration(ConfigurationError),
    Construction(ConstructionError),
}

impl From<ConfigurationError> for Error {
    fn from(error: ConfigurationError) -> Self {
        Error::Configuration(error)
    }
}

impl From<ConstructionError> for Error {
    fn from(error: ConstructionError) -> Self {
        Error::Construction(error)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Configuration(e) => e.fmt(f),
            Error::Construction(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Configuration(e) => Some(e),
            Error::Construction(e) => Some(e),
        }
    }
}
