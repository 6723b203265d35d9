//! Turns a winning genome into a renderable design summary.

use std::collections::BTreeMap;

use crate::schema::{
    FinalDesign, FitnessMetrics, GeneKind, MaterialUsage, StructuralAnalysis, StructuralGenome,
};

/// Mass heuristic per gene, in kilograms.
pub const GENE_MASS: f32 = 100.0;

/// Placeholder structural figures. Not computed from the geometry.
pub const PLACEHOLDER_ANALYSIS: StructuralAnalysis = StructuralAnalysis {
    max_stress: 150.0,
    max_deflection: 0.015,
    safety_factor: 2.0,
};

/// Build the final design for a scored genome.
pub fn synthesize(genome: &StructuralGenome, metrics: &FitnessMetrics) -> FinalDesign {
    let vertices = genome
        .genes
        .iter()
        .filter(|g| matches!(g.kind, GeneKind::Column | GeneKind::Beam))
        .flat_map(|g| {
            let length = g.dimensions.length.unwrap_or(0.0);
            let axis = g.axis();
            let start = g.position;
            let end = [
                start[0] + axis[0] * length,
                start[1] + axis[1] * length,
                start[2] + axis[2] * length,
            ];
            [start, end]
        })
        .collect();

    let materials: Vec<String> = genome.genes.iter().map(|g| g.material.clone()).collect();

    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for material in &materials {
        *tally.entry(material.as_str()).or_default() += 1;
    }
    let material_tally = tally
        .into_iter()
        .map(|(name, count)| MaterialUsage {
            name: name.to_string(),
            count,
        })
        .collect();

    FinalDesign {
        vertices,
        material_tally,
        materials,
        structural_analysis: PLACEHOLDER_ANALYSIS,
        estimated_cost: metrics.material_cost,
        estimated_weight: genome.len() as f32 * GENE_MASS,
    }
}
