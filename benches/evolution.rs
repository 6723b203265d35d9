//! Benchmarks for fitness evaluation and short optimization runs.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use bionic_design::{
    compute::evolution::{EvolutionEngine, FitnessEvaluator, GenomeRng},
    schema::{BionicDesignParams, GeneticAlgorithmConfig, PatternKind, SelectionMethod},
};

fn bench_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitness");
    let evaluator = FitnessEvaluator::from_params(&BionicDesignParams::default());
    let mut rng = GenomeRng::new(42);

    for kind in PatternKind::ALL {
        let genome = rng.pattern_genome(kind);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}_{}", kind, genome.len())),
            &genome,
            |b, genome| {
                b.iter(|| evaluator.evaluate(black_box(genome)));
            },
        );
    }

    group.finish();
}

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");
    group.sample_size(10);

    for method in [
        SelectionMethod::Tournament,
        SelectionMethod::Roulette,
        SelectionMethod::Rank,
    ] {
        let config = GeneticAlgorithmConfig {
            population_size: 30,
            generations: 10,
            selection_method: method,
            random_seed: Some(7),
            ..Default::default()
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", method)),
            &config,
            |b, config| {
                b.iter(|| {
                    EvolutionEngine::new(BionicDesignParams::default(), config.clone())
                        .and_then(|mut engine| engine.run("bench"))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_fitness, bench_optimize);
criterion_main!(benches);
