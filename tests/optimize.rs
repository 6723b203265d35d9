//! End-to-end optimization runs through `optimize_design`.

use bionic_design::schema::{
    BiomimicryReference, BionicDesignParams, DesignConstraints, GeneKind, GeneticAlgorithmConfig,
    ObjectiveFunction, SelectionMethod,
};
use bionic_design::{OptimizeError, SimulationResult, optimize_design};
use proptest::prelude::*;

fn run(params: &BionicDesignParams, config: &GeneticAlgorithmConfig) -> SimulationResult {
    pollster::block_on(optimize_design(params, config, "integration")).unwrap()
}

fn config(population_size: usize, generations: usize, seed: u64) -> GeneticAlgorithmConfig {
    GeneticAlgorithmConfig {
        population_size,
        generations,
        random_seed: Some(seed),
        ..Default::default()
    }
}

fn assert_well_formed(result: &SimulationResult) {
    let m = &result.best_fitness;
    for score in [
        m.structural_efficiency,
        m.thermal_performance,
        m.aerodynamic_efficiency,
        m.aesthetic_score,
    ] {
        assert!((0.0..=1.0).contains(&score), "sub-score {score} out of range");
    }
    if !result.best_genome.is_empty() {
        assert!(m.material_cost > 0.0);
    }
    assert_eq!(result.final_design.estimated_cost, m.material_cost);
    assert!(result.evolution_history.iter().all(|r| r.diversity >= 0.0));
    assert!(m.overall_fitness.is_finite());
}

#[test]
fn test_history_bounded_by_generations() {
    let params = BionicDesignParams::default();
    for generations in [0, 1, 4, 12] {
        let result = run(&params, &config(10, generations, 3));
        let len = result.evolution_history.len();
        assert!(len >= 1);
        assert!(len <= generations.max(1));
        assert_eq!(result.evolution_history.last().unwrap().generation, result.generation);
    }
}

#[test]
fn test_elitism_never_regresses() {
    for method in [
        SelectionMethod::Tournament,
        SelectionMethod::Roulette,
        SelectionMethod::Rank,
    ] {
        let config = GeneticAlgorithmConfig {
            selection_method: method,
            elitism_rate: 0.1,
            mutation_rate: 0.5,
            ..config(12, 25, 11)
        };
        let result = run(&BionicDesignParams::default(), &config);
        for pair in result.evolution_history.windows(2) {
            assert!(
                pair[1].best_fitness >= pair[0].best_fitness - 1e-5,
                "{method:?}: {} fell to {}",
                pair[0].best_fitness,
                pair[1].best_fitness
            );
        }
    }
}

#[test]
fn test_ids_are_unique() {
    let params = BionicDesignParams::default();
    let config = config(6, 2, 5);
    let a = run(&params, &config);
    let b = run(&params, &config);
    assert_ne!(a.id, b.id);
    assert!(a.id.starts_with("sim-"));
    assert_eq!(a.project_id, "integration");
}

#[test]
fn test_every_objective_is_well_formed() {
    for objective in [
        ObjectiveFunction::Structural,
        ObjectiveFunction::Thermal,
        ObjectiveFunction::Aerodynamic,
        ObjectiveFunction::Aesthetic,
        ObjectiveFunction::MultiObjective,
    ] {
        let params = BionicDesignParams {
            objective_function: objective,
            ..Default::default()
        };
        assert_well_formed(&run(&params, &config(10, 6, 21)));
    }
}

#[test]
fn test_tiny_budget_still_returns_result() {
    let params = BionicDesignParams {
        objective_function: ObjectiveFunction::Structural,
        constraints: DesignConstraints {
            max_cost: Some(1.0),
            ..Default::default()
        },
        ..Default::default()
    };
    let result = run(&params, &config(10, 5, 8));
    assert_well_formed(&result);
    if result.best_fitness.material_cost > 1.0 {
        assert!(result.best_fitness.overall_fitness <= 0.5 + 1e-6);
    }
}

#[test]
fn test_biomimicry_seeding() {
    let params = BionicDesignParams {
        biomimicry_reference: Some(BiomimicryReference {
            organism: "Honeybee".to_string(),
            characteristics: vec!["hexagonal".to_string()],
        }),
        ..Default::default()
    };
    // A single pass scores the seeded population without variation.
    let result = run(&params, &config(4, 0, 1));
    assert!(!result.best_genome.is_empty());
    assert!(result.best_genome.genes.iter().all(|g| g.kind == GeneKind::Shell));
    assert_well_formed(&result);

    let unknown = BionicDesignParams {
        biomimicry_reference: Some(BiomimicryReference {
            organism: "tardigrade".to_string(),
            characteristics: Vec::new(),
        }),
        ..Default::default()
    };
    assert_well_formed(&run(&unknown, &config(6, 3, 1)));
}

#[test]
fn test_invalid_configuration() {
    let bad = GeneticAlgorithmConfig {
        mutation_rate: 1.5,
        ..Default::default()
    };
    let err = pollster::block_on(optimize_design(&BionicDesignParams::default(), &bad, "x"))
        .unwrap_err();
    assert!(matches!(err, OptimizeError::InvalidConfiguration(_)));
}

#[test]
fn test_result_serializes() {
    let result = run(&BionicDesignParams::default(), &config(6, 2, 9));
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["final_design"]["vertices"].is_array());
    assert_eq!(
        json["evolution_history"].as_array().map(Vec::len),
        Some(result.evolution_history.len())
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_runs_are_well_formed(
        population_size in 1usize..10,
        generations in 0usize..6,
        elitism_rate in 0.0f32..=1.0,
        seed in any::<u64>(),
    ) {
        let config = GeneticAlgorithmConfig {
            elitism_rate,
            ..config(population_size, generations, seed)
        };
        let result = run(&BionicDesignParams::default(), &config);
        let len = result.evolution_history.len();
        prop_assert!(len >= 1 && len <= generations.max(1));
        prop_assert_eq!(result.final_design.estimated_cost, result.best_fitness.material_cost);
        prop_assert!(result.evolution_history.iter().all(|r| r.diversity >= 0.0));
    }
}
