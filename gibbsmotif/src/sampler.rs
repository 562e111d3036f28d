//! Exclude-one Gibbs sampling of motif windows.

use std::collections::HashMap;
use std::iter::Iterator;

use log::debug;
use log::trace;
use rand::distributions::Distribution;
use rand::Rng;
use rand_distr::WeightedIndex;

use super::abc::Alphabet;
use super::abc::Background;
use super::abc::Dna;
use super::abc::Pseudocounts;
use super::collection::MotifState;
use super::collection::SequenceCollection;
use super::config::SamplerConfig;
use super::convergence::pwms_similar;
use super::err::ConfigurationError;
use super::err::Error;
use super::pwm::calc_pwm;
use super::pwm::FrequencyMatrix;

// --- GibbsStep ---------------------------------------------------------------

/// The outcome of a single sampling step.
#[derive(Clone, Debug)]
pub struct GibbsStep<A: Alphabet = Dna> {
    /// The state after resampling the held-out window.
    pub new_state: MotifState,
    /// The state the step started from.
    pub old_state: MotifState,
    /// The matrix built from every window of the new state.
    pub new_pwm: FrequencyMatrix<A>,
    /// The matrix built from every window of the old state.
    pub old_pwm: FrequencyMatrix<A>,
    /// The index of the held-out sequence.
    pub excluded: usize,
}

/// Run a single exclude-one sampling step.
///
/// A sequence is drawn uniformly and held out, a matrix is built from the
/// windows of every other sequence, and the window of the held-out sequence
/// is redrawn with a probability proportional to the likelihood ratio of
/// each candidate window under the matrix versus the background. Ratios
/// are accumulated as log-odds, so any motif width is handled.
///
/// The collection is never modified: the state is taken by value and the
/// updated state is returned in the [`GibbsStep`].
pub fn run_sampler<A, R>(
    collection: &SequenceCollection<A>,
    state: MotifState,
    background: &Background<A>,
    pseudocounts: &Pseudocounts<A>,
    rng: &mut R,
) -> Result<GibbsStep<A>, Error>
where
    A: Alphabet,
    R: Rng + ?Sized,
{
    if collection.is_empty() || !state.matches(collection) {
        return Err(ConfigurationError::InvalidState.into());
    }

    let old_pwm = calc_pwm(state.instances(collection), pseudocounts)?;
    let excluded = rng.gen_range(0..collection.len());

    let others = state
        .instances(collection)
        .into_iter()
        .enumerate()
        .filter(|&(i, _)| i != excluded)
        .map(|(_, window)| window);
    let weights = calc_pwm(others, pseudocounts)?.to_weight(background);

    let record = &collection[excluded];
    let scores = record
        .instances()
        .iter()
        .map(|window| weights.log_score(window))
        .collect::<Vec<f64>>();

    // likelihood ratios are rescaled by the best window before leaving log space
    let mut new_state = state.clone();
    let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if best.is_finite() {
        let ratios = scores.iter().map(|&x| (x - best).exp());
        if let Ok(dist) = WeightedIndex::<f64>::new(ratios) {
            new_state.set(excluded, dist.sample(rng));
        }
    }
    let new_pwm = calc_pwm(new_state.instances(collection), pseudocounts)?;

    trace!(
        "held out {} ({}), window {} -> {}",
        excluded,
        record.name(),
        state.start(excluded),
        new_state.start(excluded)
    );

    Ok(GibbsStep {
        new_state,
        old_state: state,
        new_pwm,
        old_pwm,
        excluded,
    })
}

// --- Sampler -----------------------------------------------------------------

/// An iterator over the steps of a single sampling chain.
#[derive(Debug)]
pub struct Sampler<'a, R: Rng, A: Alphabet = Dna> {
    /// A reference to the sampled collection.
    collection: &'a SequenceCollection<A>,
    /// A reference to the background frequencies of the collection.
    background: &'a Background<A>,
    /// The pseudocounts used to build matrices.
    pseudocounts: Pseudocounts<A>,
    /// The random number generator.
    rng: R,
    /// The current state of the chain.
    state: MotifState,
    /// The number of steps already taken.
    step: usize,
}

impl<'a, R: Rng, A: Alphabet> Sampler<'a, R, A> {
    /// Create a new chain starting from the given state.
    pub fn new(
        collection: &'a SequenceCollection<A>,
        background: &'a Background<A>,
        state: MotifState,
        pseudocounts: Pseudocounts<A>,
        rng: R,
    ) -> Self {
        Self {
            collection,
            background,
            pseudocounts,
            rng,
            state,
            step: 0,
        }
    }

    /// The current state of the chain.
    #[inline]
    pub fn state(&self) -> &MotifState {
        &self.state
    }

    /// The number of steps taken so far.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }
}

impl<'a, R: Rng, A: Alphabet> Iterator for Sampler<'a, R, A> {
    type Item = Result<GibbsStep<A>, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        let result = run_sampler(
            self.collection,
            self.state.clone(),
            self.background,
            &self.pseudocounts,
            &mut self.rng,
        );
        if let Ok(step) = &result {
            self.state = step.new_state.clone();
            self.step += 1;
        }
        Some(result)
    }
}

// --- GibbsSampler ------------------------------------------------------------

/// A summary of a single sampling chain.
#[derive(Clone, Debug)]
pub struct ChainSummary<A: Alphabet = Dna> {
    /// The most frequent motif of the chain.
    pub consensus: String,
    /// The final matrix of the chain.
    pub pwm: FrequencyMatrix<A>,
    /// The final state of the chain.
    pub state: MotifState,
    /// The number of steps taken by the chain.
    pub iterations: usize,
    /// Whether the chain stopped early on a stable matrix.
    pub converged: bool,
}

/// The result of a complete sampling run.
#[derive(Clone, Debug)]
pub struct SamplerResult<A: Alphabet = Dna> {
    /// The most frequent consensus across all chains.
    pub consensus: String,
    /// The final matrix of the first chain reaching the consensus.
    pub pwm: FrequencyMatrix<A>,
    /// The final state of the first chain reaching the consensus.
    pub state: MotifState,
    /// The final windows of the first chain reaching the consensus.
    pub motifs: Vec<String>,
    /// The number of steps taken by the first chain reaching the consensus.
    pub iterations: usize,
    /// Whether the first chain reaching the consensus converged.
    pub converged: bool,
    /// The summaries of every chain, in order.
    pub chains: Vec<ChainSummary<A>>,
}

/// A Gibbs sampler running one or more chains over a collection.
#[derive(Clone, Debug)]
pub struct GibbsSampler {
    config: SamplerConfig,
}

impl GibbsSampler {
    /// Create a new sampler from a validated configuration.
    pub fn new(config: SamplerConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration of the sampler.
    #[inline]
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Run every chain and report the consensus motif.
    ///
    /// The first chain starts from the windows currently selected in the
    /// collection, every other chain from a uniformly random state.
    pub fn run<A, R>(
        &self,
        collection: &SequenceCollection<A>,
        background: &Background<A>,
        rng: &mut R,
    ) -> Result<SamplerResult<A>, Error>
    where
        A: Alphabet,
        R: Rng + ?Sized,
    {
        if collection.width() != self.config.width {
            return Err(ConfigurationError::MixedWidths.into());
        }
        let pseudocounts = Pseudocounts::from(self.config.pseudocount);

        let mut chains = Vec::with_capacity(self.config.restarts);
        for chain in 0..self.config.restarts {
            let state = if chain == 0 {
                collection.motif_state()
            } else {
                collection.random_state(rng)
            };
            debug!("starting chain {} of {}", chain + 1, self.config.restarts);
            let summary = self.run_chain(collection, background, &pseudocounts, state, rng)?;
            debug!(
                "chain {} finished after {} steps with consensus {}",
                chain + 1,
                summary.iterations,
                summary.consensus
            );
            chains.push(summary);
        }

        let consensus = most_common(chains.iter().map(|c| c.consensus.as_str()))
            .map(String::from)
            .unwrap_or_default();
        let best = chains
            .iter()
            .find(|c| c.consensus == consensus)
            .ok_or(ConfigurationError::InvalidRestarts)?;

        Ok(SamplerResult {
            motifs: best.state.motifs(collection),
            pwm: best.pwm.clone(),
            state: best.state.clone(),
            iterations: best.iterations,
            converged: best.converged,
            consensus,
            chains,
        })
    }

    fn run_chain<A, R>(
        &self,
        collection: &SequenceCollection<A>,
        background: &Background<A>,
        pseudocounts: &Pseudocounts<A>,
        state: MotifState,
        rng: &mut R,
    ) -> Result<ChainSummary<A>, Error>
    where
        A: Alphabet,
        R: Rng + ?Sized,
    {
        let mut pwm = calc_pwm(state.instances(collection), pseudocounts)?;
        let mut last = state.clone();
        let mut motifs = Vec::with_capacity(self.config.iterations);
        let mut similar = 0;
        let mut converged = false;

        let sampler = Sampler::new(collection, background, state, pseudocounts.clone(), rng);
        for result in sampler.take(self.config.iterations) {
            let step = result?;
            motifs.push(step.new_pwm.consensus().to_string());
            if pwms_similar(&step.old_pwm, &step.new_pwm, self.config.epsilon) {
                similar += 1;
            } else {
                similar = 0;
            }
            pwm = step.new_pwm;
            last = step.new_state;
            if self.config.patience > 0 && similar >= self.config.patience {
                debug!("matrix stable for {} steps, stopping early", similar);
                converged = true;
                break;
            }
        }

        let consensus = most_common(motifs.iter().map(String::as_str))
            .map(String::from)
            .unwrap_or_else(|| pwm.consensus().to_string());
        Ok(ChainSummary {
            iterations: motifs.len(),
            consensus,
            pwm,
            state: last,
            converged,
        })
    }
}

/// Get the most frequent item, ties going to the first one seen.
fn most_common<'s, I>(items: I) -> Option<&'s str>
where
    I: IntoIterator<Item = &'s str>,
{
    let mut counts: HashMap<&'s str, (usize, usize)> = HashMap::new();
    for (i, item) in items.into_iter().enumerate() {
        counts.entry(item).or_insert((0, i)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (c1, i1)), (_, (c2, i2))| c1.cmp(c2).then(i2.cmp(i1)))
        .map(|(item, _)| item)
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn collection(width: usize, rng: &mut StdRng) -> SequenceCollection {
        SequenceCollection::from_sequences(
            [
                ("s1", "ACGTACGTTTGACA"),
                ("s2", "TTTTACGACCAGTA"),
                ("s3", "GGCATTGACAAC"),
                ("s4", "CCCCTTGACAGG"),
            ],
            width,
            rng,
        )
        .unwrap()
    }

    #[test]
    fn test_most_common() {
        assert_eq!(most_common(["a", "b", "b", "a", "c"]), Some("a"));
        assert_eq!(most_common(["c", "b", "b", "a"]), Some("b"));
        assert_eq!(most_common(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_run_sampler_preserves_size() {
        let mut rng = StdRng::seed_from_u64(42);
        let c = collection(6, &mut rng);
        let bg = c.background().unwrap();
        let pseudo = Pseudocounts::default();
        let mut state = c.motif_state();
        for _ in 0..100 {
            let step = run_sampler(&c, state, &bg, &pseudo, &mut rng).unwrap();
            assert_eq!(step.new_state.len(), c.len());
            assert_eq!(step.old_state.len(), c.len());
            let diff = step.old_state.differences(&step.new_state);
            assert!(diff.len() <= 1);
            if let Some(&i) = diff.first() {
                assert_eq!(i, step.excluded);
            }
            assert_eq!(step.new_pwm.len(), 6);
            assert_eq!(step.old_pwm.len(), 6);
            state = step.new_state;
        }
    }

    #[test]
    fn test_run_sampler_old_pwm() {
        let mut rng = StdRng::seed_from_u64(3);
        let c = collection(4, &mut rng);
        let bg = c.background().unwrap();
        let pseudo = Pseudocounts::default();
        let state = c.motif_state();
        let expected = calc_pwm(state.instances(&c), &pseudo).unwrap();
        let step = run_sampler(&c, state.clone(), &bg, &pseudo, &mut rng).unwrap();
        assert_eq!(step.old_state, state);
        assert_eq!(step.old_pwm, expected);
    }

    #[test]
    fn test_run_sampler_single_window() {
        let mut rng = StdRng::seed_from_u64(5);
        let c = SequenceCollection::<Dna>::from_sequences(
            [("s1", "ACGT"), ("s2", "TGCA")],
            4,
            &mut rng,
        )
        .unwrap();
        let bg = c.background().unwrap();
        let pseudo = Pseudocounts::default();
        let mut state = c.motif_state();
        for _ in 0..10 {
            let step = run_sampler(&c, state, &bg, &pseudo, &mut rng).unwrap();
            assert_eq!(step.new_state.starts(), &[0, 0]);
            state = step.new_state;
        }
    }

    #[test]
    fn test_run_sampler_wide_motif() {
        let mut rng = StdRng::seed_from_u64(8);
        let sequence = (0..1002)
            .map(|_| ['A', 'C', 'G', 'T'][rng.gen_range(0..4)])
            .collect::<String>();
        let names = (0..21).map(|i| format!("s{}", i)).collect::<Vec<_>>();
        let c = SequenceCollection::<Dna>::from_sequences(
            names.iter().map(|n| (n.as_str(), sequence.as_str())),
            1000,
            &mut rng,
        )
        .unwrap();
        let bg = c.background().unwrap();
        let pseudo = Pseudocounts::default();
        let mut starts = vec![0; 21];
        starts[0] = 2;
        let mut state = MotifState::new(starts);
        for _ in 0..300 {
            state = run_sampler(&c, state, &bg, &pseudo, &mut rng)
                .unwrap()
                .new_state;
        }
        assert_eq!(state.start(0), 0);
        assert!(state.starts().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_run_sampler_invalid_state() {
        let mut rng = StdRng::seed_from_u64(5);
        let c = collection(4, &mut rng);
        let bg = c.background().unwrap();
        let state = MotifState::new(vec![0, 0]);
        let err = run_sampler(&c, state, &bg, &Pseudocounts::default(), &mut rng).unwrap_err();
        assert_eq!(err, Error::Configuration(ConfigurationError::InvalidState));
    }

    #[test]
    fn test_sampler_iterator() {
        let mut rng = StdRng::seed_from_u64(11);
        let c = collection(5, &mut rng);
        let bg = c.background().unwrap();
        let mut sampler = Sampler::new(&c, &bg, c.motif_state(), Pseudocounts::default(), rng);
        let mut previous = sampler.state().clone();
        for step in sampler.by_ref().take(20) {
            let step = step.unwrap();
            assert_eq!(step.old_state, previous);
            previous = step.new_state;
        }
        assert_eq!(sampler.step(), 20);
        assert_eq!(sampler.state(), &previous);
    }

    #[test]
    fn test_gibbs_sampler_seeded() {
        let config = SamplerConfig {
            iterations: 50,
            restarts: 3,
            ..SamplerConfig::new(6)
        };
        let sampler = GibbsSampler::new(config).unwrap();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let c = collection(6, &mut rng);
            let bg = c.background().unwrap();
            sampler.run(&c, &bg, &mut rng).unwrap()
        };
        let r1 = run(1234);
        let r2 = run(1234);
        assert_eq!(r1.consensus, r2.consensus);
        assert_eq!(r1.state, r2.state);
        assert_eq!(r1.pwm, r2.pwm);
        assert_eq!(r1.chains.len(), 3);
        assert_eq!(r1.consensus.len(), 6);
        assert_eq!(r1.motifs.len(), 4);
    }

    #[test]
    fn test_gibbs_sampler_patience() {
        let config = SamplerConfig {
            iterations: 1000,
            patience: 5,
            epsilon: 100.0,
            ..SamplerConfig::new(4)
        };
        let sampler = GibbsSampler::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let c = collection(4, &mut rng);
        let bg = c.background().unwrap();
        let result = sampler.run(&c, &bg, &mut rng).unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 5);
    }

    #[test]
    fn test_gibbs_sampler_width_mismatch() {
        let sampler = GibbsSampler::new(SamplerConfig::new(5)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let c = collection(4, &mut rng);
        let bg = c.background().unwrap();
        assert!(sampler.run(&c, &bg, &mut rng).is_err());
    }

    #[test]
    fn test_gibbs_sampler_invalid_config() {
        let config = SamplerConfig {
            iterations: 0,
            ..SamplerConfig::new(4)
        };
        assert_eq!(
            GibbsSampler::new(config).unwrap_err(),
            ConfigurationError::InvalidIterations(0)
        );
    }
}
