use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gibbsmotif::config::SamplerConfig;
use gibbsmotif::err::ConfigurationError;
use gibbsmotif::sampler::GibbsSampler;
use gibbsmotif_io::Error;
use log::info;
use log::LevelFilter;

/// Parse an integer, ignoring surrounding whitespace.
fn parse_int(s: &str) -> Result<i64, std::num::ParseIntError> {
    s.trim().parse()
}

/// Discover a shared motif in a set of DNA sequences with Gibbs sampling.
#[derive(Parser, Debug)]
#[command(
    name = "gibbs_sampler",
    version,
    about,
    long_about = None,
    help_template = "{usage-heading} {usage}\n\n{about}\n\n{all-args}\n"
)]
struct Parameters {
    /// sequence file to load, in FASTA format
    sequence_file: PathBuf,

    /// width of the motif to search
    #[arg(allow_negative_numbers = true, value_parser = parse_int)]
    width: i64,

    /// number of sampling steps of each chain
    #[arg(
        short = 'n',
        long = "num-iter",
        default_value = "1000",
        allow_negative_numbers = true,
        value_parser = parse_int
    )]
    num_iter: i64,

    /// pseudocount added to every motif count
    #[arg(long, default_value_t = 1.0)]
    pseudocount: f64,

    /// distance under which two consecutive matrices are similar
    #[arg(long, default_value_t = gibbsmotif::convergence::DEFAULT_EPSILON)]
    epsilon: f64,

    /// stop a chain after this many similar steps (0 to disable)
    #[arg(long, default_value_t = 0)]
    patience: usize,

    /// number of independent chains to run
    #[arg(long, default_value_t = 1)]
    restarts: usize,

    /// seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Parameters {
    fn filter_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Check the raw arguments and build the sampler configuration.
    fn config(&self) -> Result<SamplerConfig, ConfigurationError> {
        if self.width <= 0 {
            return Err(ConfigurationError::InvalidWidth(self.width));
        }
        if self.num_iter <= 0 {
            return Err(ConfigurationError::InvalidIterations(self.num_iter));
        }
        let config = SamplerConfig {
            width: self.width as usize,
            iterations: self.num_iter as usize,
            pseudocount: self.pseudocount,
            epsilon: self.epsilon,
            patience: self.patience,
            restarts: self.restarts,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

fn run(params: &Parameters) -> Result<(), Error> {
    let config = params.config()?;
    let mut rng = config.rng();

    let collection = gibbsmotif_io::load(&params.sequence_file, config.width, &mut rng)?;
    let background = collection.background()?;
    let sampler = GibbsSampler::new(config)?;
    let result = sampler.run(&collection, &background, &mut rng)?;
    info!(
        "best chain ran {} steps (converged: {})",
        result.iterations, result.converged
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "consensus\t{}", result.consensus)?;
    writeln!(out, "{}", result.pwm)?;
    let windows = result.state.starts().iter().zip(result.motifs.iter());
    for (record, (start, motif)) in collection.iter().zip(windows) {
        writeln!(out, "{}\t{}\t{}", record.name(), start, motif)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let params = Parameters::parse();

    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(params.filter_level())
        .parse_default_env()
        .init();

    match run(&params) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
