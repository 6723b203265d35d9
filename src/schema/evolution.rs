//! Progress and result types produced by an optimization run.

use serde::{Deserialize, Serialize};

use super::{FitnessMetrics, StructuralGenome, Vec3};

/// Population statistics for one generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GenerationRecord {
    pub generation: usize,
    pub mean_fitness: f32,
    pub best_fitness: f32,
    /// Mean pairwise gene-count dissimilarity (0.0-1.0).
    pub diversity: f32,
}

/// Current phase of the optimizer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EvolutionPhase {
    /// Initial population built, nothing scored yet.
    Initializing,
    /// A generation was scored and recorded.
    Evaluating,
    /// Budget remains; the next generation is being bred.
    Continuing,
    /// Best fitness plateaued; the run stops early.
    Converged,
    /// Building the final design from the best genome.
    Synthesizing,
    Done,
}

/// Progress update emitted after each evaluated generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Current generation number.
    pub generation: usize,
    /// Generation budget.
    pub total_generations: usize,
    /// Best fitness this generation.
    pub best_fitness: f32,
    /// Mean fitness of the current population.
    pub mean_fitness: f32,
    /// Diversity of the current population.
    pub diversity: f32,
    /// Current phase.
    pub phase: EvolutionPhase,
}

/// Reason the run stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Generation budget exhausted.
    MaxGenerations,
    /// Best fitness plateaued.
    Converged,
}

/// Material count in the final design.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaterialUsage {
    pub name: String,
    pub count: usize,
}

/// Coarse structural figures.
///
/// These are fixed illustrative values, not the output of a finite element
/// analysis. They are not derived from the geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StructuralAnalysis {
    /// Peak stress in MPa.
    pub max_stress: f32,
    /// Peak deflection in metres.
    pub max_deflection: f32,
    pub safety_factor: f32,
}

/// Renderable summary of the winning genome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalDesign {
    /// Endpoints of every column and beam, two per member.
    pub vertices: Vec<Vec3>,
    /// Material of each gene, in gene order.
    pub materials: Vec<String>,
    /// Gene count per distinct material, sorted by name.
    pub material_tally: Vec<MaterialUsage>,
    pub structural_analysis: StructuralAnalysis,
    pub estimated_cost: f32,
    pub estimated_weight: f32,
}

/// Output of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Unique run identifier.
    pub id: String,
    pub project_id: String,
    /// Index of the last evaluated generation.
    pub generation: usize,
    pub best_genome: StructuralGenome,
    pub best_fitness: FitnessMetrics,
    /// One record per evaluated generation.
    pub evolution_history: Vec<GenerationRecord>,
    /// Mean per-generation change of the best fitness.
    pub convergence_rate: f32,
    pub final_design: FinalDesign,
    pub stop_reason: StopReason,
}
