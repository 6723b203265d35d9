//! Evolutionary search for structural designs.
//!
//! # Overview
//!
//! The evolutionary search system consists of:
//!
//! - **Genome Operations** (`genome`): Population seeding, crossover, and mutation
//! - **Fitness Evaluation** (`fitness`): Heuristic sub-scores and objective blends
//! - **Selection** (`selection`): Tournament, roulette and rank strategies
//! - **Statistics** (`stats`): Per-generation records and plateau detection
//! - **Synthesis** (`synthesis`): Final geometry, material bill and cost summary
//! - **Search** (`search`): The generational driver tying it together
//!
//! # Example
//!
//! ```rust,no_run
//! use bionic_design::schema::{BionicDesignParams, GeneticAlgorithmConfig};
//! use bionic_design::compute::evolution::EvolutionEngine;
//!
//! let config = GeneticAlgorithmConfig {
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//! let mut engine = EvolutionEngine::new(BionicDesignParams::default(), config).unwrap();
//! let result = engine
//!     .run_with_callback("atrium", |progress| {
//!         println!("Generation {}: best fitness = {:.3}",
//!             progress.generation, progress.best_fitness);
//!     })
//!     .unwrap();
//!
//! println!("Best design cost: {:.0}", result.final_design.estimated_cost);
//! ```

mod fitness;
mod genome;
mod search;
mod selection;
mod stats;
mod synthesis;

pub use fitness::{COST_SCALE, FitnessEvaluator, GOLDEN_RATIO, material_price};
pub use genome::{GenomeRng, MATERIAL_PALETTE, genome_distance};
pub use search::{EvolutionEngine, OptimizeError, next_run_id};
pub use selection::{TOURNAMENT_SIZE, select_parents};
pub use stats::{ConvergenceMonitor, convergence_rate, diversity, generation_record};
pub use synthesis::{GENE_MASS, PLACEHOLDER_ANALYSIS, synthesize};
