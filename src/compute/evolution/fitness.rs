//! Fitness evaluation for structural genomes.
//!
//! All sub-scores are closed-form heuristics over the gene list. None of
//! them performs a physical simulation.

use crate::schema::{
    BionicDesignParams, DesignConstraints, FitnessMetrics, Gene, GeneKind, ObjectiveFunction,
    StructuralGenome,
};

/// Cost normalizer used by the structural and multi-objective blends.
pub const COST_SCALE: f32 = 100_000.0;

/// Target length/width ratio for the proportion score.
pub const GOLDEN_RATIO: f32 = 1.618;

/// Allowed deviation from the golden ratio.
const PROPORTION_TOLERANCE: f32 = 0.1;

/// Distance within which a reflected gene counts as a mirror match.
const SYMMETRY_TOLERANCE: f32 = 0.5;

/// Price per unit volume.
pub fn material_price(material: &str) -> f32 {
    match material {
        "steel" => 1000.0,
        "concrete" => 200.0,
        "timber" => 500.0,
        "aluminum" => 2000.0,
        "carbon-fiber" => 5000.0,
        "titanium" => 8000.0,
        "steel-cable" => 800.0,
        _ => 1000.0,
    }
}

/// Scores genomes against the run's objective and constraints.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    objective: ObjectiveFunction,
    constraints: DesignConstraints,
}

impl FitnessEvaluator {
    /// Create a new fitness evaluator.
    pub fn new(objective: ObjectiveFunction, constraints: DesignConstraints) -> Self {
        Self {
            objective,
            constraints,
        }
    }

    /// Evaluator for a run's design parameters.
    pub fn from_params(params: &BionicDesignParams) -> Self {
        Self::new(params.objective_function, params.constraints.clone())
    }

    /// Compute all sub-scores and the combined fitness.
    pub fn evaluate(&self, genome: &StructuralGenome) -> FitnessMetrics {
        let genes = &genome.genes;
        if genes.is_empty() {
            return FitnessMetrics::default();
        }

        let mut metrics = FitnessMetrics {
            structural_efficiency: structural_efficiency(genes),
            material_cost: material_cost(genes),
            thermal_performance: (2.0 * kind_fraction(genes, GeneKind::is_surface)).min(1.0),
            aerodynamic_efficiency: (1.5 * kind_fraction(genes, |k| k == GeneKind::Shell))
                .min(1.0),
            aesthetic_score: 0.5 * (symmetry(genes) + proportion(genes)),
            overall_fitness: 0.0,
        };
        metrics.overall_fitness = self.combine(&metrics);
        metrics
    }

    /// Objective-weighted scalar, halved when over budget.
    fn combine(&self, m: &FitnessMetrics) -> f32 {
        let affordability = 1.0 - m.material_cost / COST_SCALE;
        let mut fitness = match self.objective {
            ObjectiveFunction::Structural => 0.7 * m.structural_efficiency + 0.3 * affordability,
            ObjectiveFunction::Thermal => m.thermal_performance,
            ObjectiveFunction::Aerodynamic => m.aerodynamic_efficiency,
            ObjectiveFunction::Aesthetic => m.aesthetic_score,
            ObjectiveFunction::MultiObjective => {
                0.3 * m.structural_efficiency
                    + 0.2 * affordability
                    + 0.2 * m.thermal_performance
                    + 0.15 * m.aerodynamic_efficiency
                    + 0.15 * m.aesthetic_score
            }
        };

        if let Some(max_cost) = self.constraints.max_cost
            && m.material_cost > max_cost
        {
            fitness *= 0.5;
        }
        fitness
    }
}

/// Load-bearing share of volume. Columns and beams count double, braces 1.5x.
fn structural_efficiency(genes: &[Gene]) -> f32 {
    let (weighted, total) = genes.iter().fold((0.0f32, 0.0f32), |(weighted, total), gene| {
        let volume = gene.volume();
        let weight = match gene.kind {
            GeneKind::Column | GeneKind::Beam => 2.0,
            GeneKind::Brace => 1.5,
            GeneKind::Shell | GeneKind::Membrane => 0.0,
        };
        (weighted + volume * weight, total + volume)
    });
    if total > 0.0 {
        (weighted / total).min(1.0)
    } else {
        0.0
    }
}

fn material_cost(genes: &[Gene]) -> f32 {
    genes
        .iter()
        .map(|g| g.volume() * material_price(&g.material))
        .sum()
}

fn kind_fraction(genes: &[Gene], predicate: impl Fn(GeneKind) -> bool) -> f32 {
    genes.iter().filter(|g| predicate(g.kind)).count() as f32 / genes.len() as f32
}

/// Mean over the three reflection planes of the share of genes with a
/// mirror image in the genome.
fn symmetry(genes: &[Gene]) -> f32 {
    let tolerance_sq = SYMMETRY_TOLERANCE * SYMMETRY_TOLERANCE;
    let per_axis = (0..3).map(|axis| {
        let mirrored = genes
            .iter()
            .filter(|gene| {
                let mut reflected = gene.position;
                reflected[axis] = -reflected[axis];
                genes.iter().any(|other| {
                    let dx = other.position[0] - reflected[0];
                    let dy = other.position[1] - reflected[1];
                    let dz = other.position[2] - reflected[2];
                    dx * dx + dy * dy + dz * dz <= tolerance_sq
                })
            })
            .count();
        mirrored as f32 / genes.len() as f32
    });
    per_axis.sum::<f32>() / 3.0
}

/// Share of length/width ratios near the golden ratio.
fn proportion(genes: &[Gene]) -> f32 {
    let ratios: Vec<f32> = genes
        .iter()
        .filter_map(|g| match (g.dimensions.length, g.dimensions.width) {
            (Some(l), Some(w)) if w > 0.0 => Some(l / w),
            _ => None,
        })
        .collect();
    if ratios.is_empty() {
        return 0.0;
    }
    let golden = ratios
        .iter()
        .filter(|r| (*r - GOLDEN_RATIO).abs() <= PROPORTION_TOLERANCE)
        .count();
    golden as f32 / ratios.len() as f32
}
