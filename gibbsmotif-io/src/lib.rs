#![doc = include_str!("../README.md")]

extern crate gibbsmotif;

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use gibbsmotif::abc::Dna;
use gibbsmotif::collection::SequenceCollection;
use gibbsmotif::err::ConfigurationError;
use log::debug;
use log::info;
use rand::Rng;

pub mod error;
pub mod fasta;

pub use error::Error;

/// Load a sequence collection from a FASTA file.
///
/// The initial motif window of every record is drawn from `rng`.
pub fn load<P, R>(path: P, width: usize, rng: &mut R) -> Result<SequenceCollection<Dna>, Error>
where
    P: AsRef<Path>,
    R: Rng + ?Sized,
{
    let path = path.as_ref();
    debug!("loading sequences from {:?}", path);
    let file = File::open(path)?;
    load_from_reader(BufReader::new(file), width, rng)
}

/// Load a sequence collection from any buffered reader in FASTA format.
///
/// Input without a single record is not considered a FASTA file. The
/// number of records is checked before any record is built.
pub fn load_from_reader<B, R>(
    reader: B,
    width: usize,
    rng: &mut R,
) -> Result<SequenceCollection<Dna>, Error>
where
    B: BufRead,
    R: Rng + ?Sized,
{
    let records = fasta::read(reader).collect::<Result<Vec<_>, _>>()?;
    if records.is_empty() {
        return Err(Error::Format(None));
    }
    if records.len() < 2 {
        return Err(ConfigurationError::TooFewSequences(records.len()).into());
    }
    let collection = SequenceCollection::from_sequences(
        records.into_iter().map(|r| (r.id, r.sequence)),
        width,
        rng,
    )?;
    info!(
        "loaded {} sequences with motif width {}",
        collection.len(),
        collection.width()
    );
    Ok(collection)
}
