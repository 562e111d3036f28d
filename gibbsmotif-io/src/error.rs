use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

use gibbsmotif::err::ConfigurationError;
use gibbsmotif::err::ConstructionError;
use nom::error::Error as NomError;

/// An error raised while loading a sequence collection.
#[derive(Clone, Debug)]
pub enum Error {
    /// The input could not be read.
    Io(Arc<std::io::Error>),
    /// The input is not a FASTA file.
    Format(Option<Arc<NomError<String>>>),
    /// The records do not form a usable collection.
    Configuration(ConfigurationError),
    /// A record could not be built.
    Construction(ConstructionError),
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        // undecodable text is a format problem, not a reading one
        if error.kind() == std::io::ErrorKind::InvalidData {
            Error::Format(None)
        } else {
            Error::Io(Arc::new(error))
        }
    }
}

impl From<NomError<&'_ str>> for Error {
    fn from(error: NomError<&'_ str>) -> Self {
        Error::Format(Some(Arc::new(NomError::new(
            error.input.to_string(),
            error.code,
        ))))
    }
}

impl From<nom::Err<NomError<&'_ str>>> for Error {
    fn from(err: nom::Err<NomError<&'_ str>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => Error::Format(None),
            nom::Err::Error(e) => Error::from(e),
            nom::Err::Failure(e) => Error::from(e),
        }
    }
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

impl From<gibbsmotif::err::Error> for Error {
    fn from(error: gibbsmotif::err::Error) -> Self {
        match error {
            gibbsmotif::err::Error::Configuration(e) => Error::Configuration(e),
            gibbsmotif::err::Error::Construction(e) => Error::Construction(e),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Format(_) => f.write_str("input file is not in fasta format."),
            Error::Configuration(err) => err.fmt(f),
            Error::Construction(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Format(Some(e)) => Some(e),
            Error::Format(None) => None,
            Error::Configuration(e) => Some(e),
            Error::Construction(e) => Some(e),
        }
    }
}
