extern crate gibbsmotif;
extern crate rand;

use gibbsmotif::abc::Dna;
use gibbsmotif::abc::Pseudocounts;
use gibbsmotif::collection::SequenceCollection;
use gibbsmotif::config::SamplerConfig;
use gibbsmotif::sampler::run_sampler;
use gibbsmotif::sampler::GibbsSampler;
use gibbsmotif::sampler::Sampler;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

const MOTIF: &str = "GTGGTT";

/// Build sequences made of `A` and `C` with the motif planted once in each.
fn planted(rng: &mut StdRng, count: usize, length: usize) -> Vec<(String, String)> {
    (0..count)
        .map(|i| {
            let mut seq = (0..length - MOTIF.len())
                .map(|_| if rng.gen_bool(0.5) { 'A' } else { 'C' })
                .collect::<String>();
            let pos = rng.gen_range(0..=seq.len());
            seq.insert_str(pos, MOTIF);
            (format!("seq{}", i + 1), seq)
        })
        .collect()
}

#[test]
fn planted_motif_is_recovered() {
    let mut rng = StdRng::seed_from_u64(2024);
    let sequences = planted(&mut rng, 8, 30);
    let collection =
        SequenceCollection::<Dna>::from_sequences(sequences, MOTIF.len(), &mut rng).unwrap();
    let background = collection.background().unwrap();

    let config = SamplerConfig {
        iterations: 300,
        restarts: 10,
        ..SamplerConfig::new(MOTIF.len())
    };
    let sampler = GibbsSampler::new(config).unwrap();
    let result = sampler.run(&collection, &background, &mut rng).unwrap();

    assert_eq!(result.chains.len(), 10);
    assert_eq!(result.consensus, MOTIF);
    assert!(
        result.chains.iter().any(|c| c.consensus == MOTIF),
        "no chain recovered {}: {:?}",
        MOTIF,
        result.chains.iter().map(|c| &c.consensus).collect::<Vec<_>>()
    );
}

#[test]
fn seeded_chains_are_reproducible() {
    let run = || {
        let mut rng = StdRng::seed_from_u64(7);
        let sequences = planted(&mut rng, 5, 25);
        let collection =
            SequenceCollection::<Dna>::from_sequences(sequences, 5, &mut rng).unwrap();
        let background = collection.background().unwrap();
        let sampler = Sampler::new(
            &collection,
            &background,
            collection.motif_state(),
            Pseudocounts::default(),
            rng,
        );
        let states = sampler
            .take(100)
            .map(|step| step.unwrap().new_state)
            .collect::<Vec<_>>();
        states
    };
    assert_eq!(run(), run());
}

#[test]
fn steps_change_at_most_one_window() {
    let mut rng = StdRng::seed_from_u64(99);
    let sequences = planted(&mut rng, 6, 20);
    let collection = SequenceCollection::<Dna>::from_sequences(sequences, 4, &mut rng).unwrap();
    let background = collection.background().unwrap();
    let pseudocounts = Pseudocounts::default();

    let mut state = collection.motif_state();
    for _ in 0..500 {
        let step = run_sampler(&collection, state, &background, &pseudocounts, &mut rng).unwrap();
        assert_eq!(step.new_state.len(), collection.len());
        assert_eq!(step.old_state.len(), collection.len());
        assert!(step.old_state.differences(&step.new_state).len() <= 1);
        assert!(step.new_state.matches(&collection));
        for i in 0..step.new_pwm.len() {
            let total: f64 = step.new_pwm.column(i).iter().sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
        state = step.new_state;
    }
}
