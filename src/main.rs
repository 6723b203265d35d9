//! Bionic Design CLI - Run optimizations from a JSON request.

use std::path::PathBuf;
use std::time::Instant;

use bionic_design::{
    compute::evolution::EvolutionEngine,
    get_available_patterns,
    schema::{
        BiomimicryReference, BionicDesignParams, DesignConstraints, EvolutionPhase,
        GeneticAlgorithmConfig, ObjectiveFunction, OptimizationRequest,
    },
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <request.json> [output.json]", args[0]);
        eprintln!();
        eprintln!("Run a bionic design optimization from a JSON request.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  request.json  Path to optimization request");
        eprintln!("  output.json   Where to write the full result (default: stdout summary only)");
        eprintln!();
        eprintln!("Flags:");
        eprintln!("  --example     Print an example request");
        eprintln!("  --patterns    List available biomimicry patterns");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--example" => {
            print_example_request();
            return;
        }
        "--patterns" => {
            print_patterns();
            return;
        }
        _ => {}
    }

    let request_path = PathBuf::from(&args[1]);
    let request = OptimizationRequest::from_json_file(&request_path).unwrap_or_else(|e| {
        eprintln!("Error loading request: {}", e);
        std::process::exit(1);
    });

    println!("Bionic Design Optimization");
    println!("==========================");
    println!("Project: {}", request.project_id);
    println!("Objective: {:?}", request.params.objective_function);
    println!(
        "Population: {} x {} generations ({:?} selection)",
        request.config.population_size,
        request.config.generations,
        request.config.selection_method
    );
    if let Some(reference) = &request.params.biomimicry_reference {
        println!("Biomimicry: {}", reference.organism);
    }
    println!();

    let mut engine = EvolutionEngine::new(request.params.clone(), request.config.clone())
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let start = Instant::now();
    let report_every = (request.config.generations / 10).max(1);
    let result = engine
        .run_with_callback(&request.project_id, |progress| {
            if progress.phase == EvolutionPhase::Evaluating
                && progress.generation % report_every == 0
            {
                println!(
                    "  Generation {}/{}: best={:.4}, mean={:.4}, diversity={:.3}",
                    progress.generation,
                    progress.total_generations,
                    progress.best_fitness,
                    progress.mean_fitness,
                    progress.diversity
                );
            }
        })
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    let elapsed = start.elapsed();

    let best = &result.best_fitness;
    println!();
    println!("Result {}", result.id);
    println!("  Stopped: {:?} at generation {}", result.stop_reason, result.generation);
    println!("  Genes: {}", result.best_genome.len());
    println!("  Overall fitness: {:.4}", best.overall_fitness);
    println!("  Structural efficiency: {:.3}", best.structural_efficiency);
    println!("  Thermal performance: {:.3}", best.thermal_performance);
    println!("  Aerodynamic efficiency: {:.3}", best.aerodynamic_efficiency);
    println!("  Aesthetic score: {:.3}", best.aesthetic_score);
    println!("  Estimated cost: {:.0}", result.final_design.estimated_cost);
    println!("  Estimated weight: {:.0}", result.final_design.estimated_weight);
    println!("  Convergence rate: {:.5}/generation", result.convergence_rate);
    for usage in &result.final_design.material_tally {
        println!("    {}: {}", usage.name, usage.count);
    }
    println!("Time: {:.2}s", elapsed.as_secs_f32());

    if let Some(output) = args.get(2) {
        let json = serde_json::to_string_pretty(&result).unwrap_or_else(|e| {
            eprintln!("Error serializing result: {}", e);
            std::process::exit(1);
        });
        if let Err(e) = std::fs::write(output, json) {
            eprintln!("Error writing {}: {}", output, e);
            std::process::exit(1);
        }
        println!("Wrote {}", output);
    }
}

fn print_example_request() {
    let request = OptimizationRequest {
        project_id: "example-pavilion".to_string(),
        params: BionicDesignParams {
            objective_function: ObjectiveFunction::MultiObjective,
            constraints: DesignConstraints {
                max_cost: Some(50_000.0),
                ..Default::default()
            },
            biomimicry_reference: Some(BiomimicryReference {
                organism: "honeybee".to_string(),
                characteristics: vec!["hexagonal".to_string(), "lightweight".to_string()],
            }),
        },
        config: GeneticAlgorithmConfig {
            population_size: 30,
            generations: 50,
            random_seed: Some(42),
            ..Default::default()
        },
    };

    println!("Example request (request.json):");
    println!("{}", serde_json::to_string_pretty(&request).unwrap());
}

fn print_patterns() {
    for info in get_available_patterns() {
        println!("{} ({})", info.name, info.natural_source);
        println!("  {}", info.description);
        println!("  Applications: {}", info.applications.join(", "));
    }
}
