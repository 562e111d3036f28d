#![doc = include_str!("../README.md")]

extern crate generic_array;
extern crate rand;
extern crate typenum;

pub mod abc;
pub mod collection;
pub mod config;
pub mod convergence;
pub mod dense;
pub mod err;
pub mod pwm;
pub mod sampler;
pub mod seq;

pub use abc::Alphabet;
pub use abc::Background;
pub use abc::Dna;
pub use abc::Nucleotide;
pub use abc::Pseudocounts;
pub use abc::Symbol;
pub use collection::MotifState;
pub use collection::SequenceCollection;
pub use config::SamplerConfig;
pub use convergence::motifs_similar;
pub use convergence::pwms_similar;
pub use convergence::DEFAULT_EPSILON;
pub use dense::DenseMatrix;
pub use err::ConfigurationError;
pub use err::ConstructionError;
pub use err::Error;
pub use err::InvalidSymbol;
pub use pwm::calc_pwm;
pub use pwm::CountMatrix;
pub use pwm::FrequencyMatrix;
pub use pwm::WeightMatrix;
pub use sampler::run_sampler;
pub use sampler::GibbsSampler;
pub use sampler::GibbsStep;
pub use sampler::Sampler;
pub use sampler::SamplerResult;
pub use seq::EncodedSequence;
pub use seq::SequenceRecord;
