//! Parser implementation for sequences in FASTA format.
//!
//! A FASTA file contains one header line for each record, starting with
//! a `>` and followed by the record identifier and an optional
//! description, and then any number of sequence lines:
//! ```text
//! >mm9_chr11:95292903-95292913(+) GATA1 peak
//! GTCACTGTGTACTCTAGGCTCGTTGGTCCCCAAGCTTCTGGGTGGCTCTTTCTTATCTCC
//! CGTCTTACTGTAAGAACAGATGGAGTGCTAGAACAAGTAGGATTGTGTCTG
//! ```
//!
//! Blank lines are ignored, and sequences are upper-cased.

use std::io::BufRead;

use crate::error::Error;

mod parse;

// ---

/// A FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub(crate) id: String,
    pub(crate) description: Option<String>,
    pub(crate) sequence: String,
}

impl Record {
    /// Get the identifier of the record.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the description of the record, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the upper-cased sequence of the record.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }
}

// ---

/// An iterative reader for the FASTA format.
pub struct Reader<B: BufRead> {
    bufread: B,
    line: String,
    header: Option<String>,
    done: bool,
}

impl<B: BufRead> Reader<B> {
    /// Create a new `Reader` from a buffered reader.
    pub fn new(reader: B) -> Self {
        Self {
            bufread: reader,
            line: String::new(),
            header: None,
            done: false,
        }
    }

    /// Read the next non-blank line, without its line ending.
    fn next_line(&mut self) -> Result<Option<&str>, Error> {
        loop {
            self.line.clear();
            if self.bufread.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            if !self.line.trim().is_empty() {
                return Ok(Some(self.line.trim_end_matches(['\n', '\r'])));
            }
        }
    }

    fn read_record(&mut self) -> Result<Option<Record>, Error> {
        let header = match self.header.take() {
            Some(header) => header,
            None => match self.next_line()? {
                Some(line) => line.to_string(),
                None => return Ok(None),
            },
        };
        let (_, (id, description)) = self::parse::header(&header)?;
        let mut record = Record {
            id: id.to_string(),
            description: description.map(String::from),
            sequence: String::new(),
        };

        while let Some(line) = self.next_line()? {
            if line.starts_with('>') {
                self.header = Some(line.to_string());
                break;
            }
            let (_, seq) = self::parse::sequence_line(line)?;
            record.sequence.push_str(&seq.to_ascii_uppercase());
        }

        Ok(Some(record))
    }
}

impl<B: BufRead> Iterator for Reader<B> {
    type Item = Result<Record, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Read the records from a file in FASTA format.
pub fn read<B: BufRead>(reader: B) -> self::Reader<B> {
    self::Reader::new(reader)
}
