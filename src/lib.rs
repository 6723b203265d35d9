//! Bionic Design - Genetic optimization of biomimetic structural designs.
//!
//! This crate evolves populations of structural genomes (columns, beams,
//! braces, shells, membranes) toward designs that score well on structural
//! efficiency, material cost, thermal and aerodynamic performance, and
//! aesthetics. Populations can be seeded from nature-inspired pattern
//! generators: honeycomb, spider web, trabecular bone and tree branching.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Genome, pattern, configuration and result types
//! - `compute`: Pattern generators and the evolutionary optimizer
//!
//! # Example
//!
//! ```rust,no_run
//! use bionic_design::schema::{BionicDesignParams, GeneticAlgorithmConfig, ObjectiveFunction};
//!
//! let params = BionicDesignParams {
//!     objective_function: ObjectiveFunction::Structural,
//!     ..Default::default()
//! };
//! let config = GeneticAlgorithmConfig::default();
//!
//! let result = pollster::block_on(bionic_design::optimize_design(&params, &config, "pavilion"))
//!     .expect("valid configuration");
//! println!("Best fitness: {:.3}", result.best_fitness.overall_fitness);
//!
//! let cells = bionic_design::apply_bionic_pattern(
//!     "honeycomb",
//!     &serde_json::json!({ "width": 10, "height": 10, "cellSize": 1 }),
//! );
//! println!("Honeycomb cells: {}", cells.map_or(0, |c| c.len()));
//! ```

pub mod compute;
pub mod schema;

use rand::Rng;

// Re-export commonly used types
pub use compute::evolution::{EvolutionEngine, OptimizeError};
pub use schema::{
    BionicDesignParams, BionicPattern, Gene, GeneticAlgorithmConfig, PatternInfo, PatternKind,
    SimulationResult, StructuralGenome,
};

/// Metadata for the four catalog patterns.
pub fn get_available_patterns() -> Vec<PatternInfo> {
    PatternKind::ALL.iter().map(|kind| kind.info()).collect()
}

/// Generate a pattern by name.
///
/// Returns `None` for unknown names or parameters of the wrong type.
pub fn apply_bionic_pattern(name: &str, params: &serde_json::Value) -> Option<Vec<Gene>> {
    apply_bionic_pattern_with_rng(name, params, &mut rand::thread_rng())
}

/// [`apply_bionic_pattern`] with a caller-supplied random source.
pub fn apply_bionic_pattern_with_rng<R: Rng + ?Sized>(
    name: &str,
    params: &serde_json::Value,
    rng: &mut R,
) -> Option<Vec<Gene>> {
    let kind = PatternKind::from_name(name)?;
    match kind.with_params(params) {
        Ok(pattern) => {
            let genes = pattern.generate(rng);
            log::debug!("{:?} pattern produced {} genes", pattern.kind(), genes.len());
            Some(genes)
        }
        Err(e) => {
            log::warn!("Invalid parameters for {kind:?} pattern '{name}': {e}");
            None
        }
    }
}

/// Run a full optimization.
///
/// The work is synchronous CPU-bound computation; the function is async only
/// so request handlers can await it alongside their other calls.
pub async fn optimize_design(
    params: &BionicDesignParams,
    config: &GeneticAlgorithmConfig,
    project_id: &str,
) -> Result<SimulationResult, OptimizeError> {
    EvolutionEngine::new(params.clone(), config.clone())?.run(project_id)
}
