//! Genome manipulation utilities for evolutionary search.
//!
//! Provides population seeding, crossover, and mutation operations.

use std::f32::consts::PI;

use rand::prelude::*;

use crate::schema::{
    BionicDesignParams, BionicPattern, BoneParams, Dimensions, Gene, GeneKind, HoneycombParams,
    PatternKind, SpiderWebParams, StructuralGenome, TreeParams,
};

/// Materials drawn for randomly assembled genes.
pub const MATERIAL_PALETTE: [&str; 5] = ["steel", "concrete", "timber", "aluminum", "carbon-fiber"];

/// Gene count bounds for randomly assembled genomes.
pub const RANDOM_GENE_COUNT: (usize, usize) = (10, 40);

/// Genomes at or below this size are never shrunk.
pub const MIN_GENES_FOR_REMOVAL: usize = 5;

/// Half-extent of the cube random genes are placed in.
const SITE_EXTENT: f32 = 10.0;

/// Random number generator wrapper for genome operations.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Underlying generator, for selection and pattern generation.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Build the initial population for a run.
    ///
    /// A recognised biomimicry organism seeds every genome from its pattern
    /// with randomized scale; otherwise genomes are assembled from random genes.
    pub fn initialize_population(
        &mut self,
        params: &BionicDesignParams,
        size: usize,
    ) -> Vec<StructuralGenome> {
        let pattern = params.biomimicry_reference.as_ref().and_then(|reference| {
            let kind = PatternKind::from_organism(&reference.organism);
            if kind.is_none() {
                log::warn!(
                    "Unknown biomimicry organism '{}', seeding with random genes",
                    reference.organism
                );
            }
            kind
        });

        (0..size)
            .map(|_| match pattern {
                Some(kind) => self.pattern_genome(kind),
                None => self.random_genome(),
            })
            .collect()
    }

    /// Genome from a pattern generator with randomized shape parameters.
    pub fn pattern_genome(&mut self, kind: PatternKind) -> StructuralGenome {
        let pattern = self.random_pattern(kind);
        StructuralGenome::new(pattern.generate(&mut self.rng), 0)
    }

    /// Randomized parameters for a pattern kind.
    pub fn random_pattern(&mut self, kind: PatternKind) -> BionicPattern {
        match kind {
            PatternKind::Honeycomb => BionicPattern::Honeycomb(HoneycombParams {
                width: self.uniform((10.0, 30.0)),
                height: self.uniform((10.0, 30.0)),
                cell_size: self.uniform((0.5, 2.0)),
            }),
            PatternKind::SpiderWeb => BionicPattern::SpiderWeb(SpiderWebParams {
                radius: self.uniform((5.0, 20.0)),
                spokes: self.rng.gen_range(6..=16),
                rings: self.rng.gen_range(3..=10),
            }),
            PatternKind::TrabecularBone => BionicPattern::TrabecularBone(BoneParams {
                volume: [
                    self.uniform((5.0, 15.0)),
                    self.uniform((5.0, 15.0)),
                    self.uniform((5.0, 15.0)),
                ],
                density: self.uniform((0.3, 1.0)),
            }),
            PatternKind::TreeBranching => BionicPattern::TreeBranching(TreeParams {
                height: self.uniform((5.0, 20.0)),
                branches: self.rng.gen_range(2..=4),
                levels: self.rng.gen_range(2..=4),
            }),
        }
    }

    /// Genome of 10-40 fully random genes.
    pub fn random_genome(&mut self) -> StructuralGenome {
        let count = self.rng.gen_range(RANDOM_GENE_COUNT.0..=RANDOM_GENE_COUNT.1);
        let genes = (0..count).map(|_| self.random_gene()).collect();
        StructuralGenome::new(genes, 0)
    }

    /// Random gene with kind-appropriate dimensions.
    pub fn random_gene(&mut self) -> Gene {
        let kind = GeneKind::ALL[self.rng.gen_range(0..GeneKind::ALL.len())];
        let position = [
            self.uniform((-SITE_EXTENT, SITE_EXTENT)),
            self.uniform((0.0, SITE_EXTENT)),
            self.uniform((-SITE_EXTENT, SITE_EXTENT)),
        ];
        let orientation = [
            self.uniform((0.0, PI)),
            self.uniform((0.0, 2.0 * PI)),
            self.uniform((0.0, 2.0 * PI)),
        ];
        let dimensions = match kind {
            GeneKind::Column | GeneKind::Beam => Dimensions {
                length: Some(self.uniform((2.0, 10.0))),
                width: Some(self.uniform((0.2, 1.0))),
                height: Some(self.uniform((0.2, 1.0))),
                ..Default::default()
            },
            GeneKind::Brace => Dimensions {
                length: Some(self.uniform((1.0, 8.0))),
                thickness: Some(self.uniform((0.05, 0.3))),
                ..Default::default()
            },
            GeneKind::Shell => Dimensions {
                radius: Some(self.uniform((0.5, 3.0))),
                thickness: Some(self.uniform((0.02, 0.2))),
                ..Default::default()
            },
            GeneKind::Membrane => Dimensions {
                length: Some(self.uniform((1.0, 10.0))),
                width: Some(self.uniform((1.0, 10.0))),
                thickness: Some(0.01),
                ..Default::default()
            },
        };
        let material = *MATERIAL_PALETTE
            .choose(&mut self.rng)
            .unwrap_or(&MATERIAL_PALETTE[0]);

        Gene::new(kind, position, orientation, dimensions, material)
    }

    /// Uniform random in bounds.
    fn uniform(&mut self, bounds: (f32, f32)) -> f32 {
        self.rng.gen_range(bounds.0..=bounds.1)
    }

    /// Bernoulli trial, tolerant of rates outside [0, 1].
    pub fn chance(&mut self, rate: f32) -> bool {
        self.rng.r#gen::<f32>() < rate
    }

    /// Single-point crossover. Both children take the head of one parent
    /// and the tail of the other at a shared split index.
    pub fn crossover(
        &mut self,
        parent1: &StructuralGenome,
        parent2: &StructuralGenome,
        generation: usize,
    ) -> (StructuralGenome, StructuralGenome) {
        let split = self.rng.gen_range(0..=parent1.len().min(parent2.len()));

        let splice = |head: &StructuralGenome, tail: &StructuralGenome| {
            let genes = head.genes[..split]
                .iter()
                .chain(&tail.genes[split..])
                .cloned()
                .collect();
            StructuralGenome::new(genes, generation)
        };

        (splice(parent1, parent2), splice(parent2, parent1))
    }

    /// Apply one mutation: add (30%), remove (30%) or perturb (40%) a gene.
    pub fn mutate(&mut self, mut genome: StructuralGenome) -> StructuralGenome {
        let roll = self.rng.r#gen::<f32>();
        if roll < 0.3 {
            let gene = self.random_gene();
            let at = self.rng.gen_range(0..=genome.len());
            genome.genes.insert(at, gene);
        } else if roll < 0.6 {
            if genome.len() > MIN_GENES_FOR_REMOVAL {
                let at = self.rng.gen_range(0..genome.len());
                genome.genes.remove(at);
            }
        } else if !genome.is_empty() {
            let at = self.rng.gen_range(0..genome.len());
            let gene = self.perturb(genome.genes[at].clone());
            genome.genes[at] = gene;
        }
        genome.fitness = None;
        genome
    }

    /// Nudge the position, orientation, or first dimension of a gene.
    fn perturb(&mut self, mut gene: Gene) -> Gene {
        match self.rng.gen_range(0..3) {
            0 => {
                for axis in &mut gene.position {
                    *axis += self.gaussian(0.5);
                }
            }
            1 => {
                for angle in &mut gene.orientation {
                    *angle += self.gaussian(0.1);
                }
            }
            _ => {
                let factor = 1.0 + self.gaussian(0.1);
                if let Some(value) = gene.dimensions.first_mut() {
                    *value = (*value * factor).abs().max(1e-3);
                }
            }
        }
        gene
    }

    /// Zero-mean gaussian noise.
    fn gaussian(&mut self, strength: f32) -> f32 {
        let noise: f32 = self.rng.sample(rand_distr::StandardNormal);
        noise * strength
    }
}

/// Normalized gene-count difference between two genomes.
///
/// A coarse proxy; it says nothing about geometric similarity.
pub fn genome_distance(g1: &StructuralGenome, g2: &StructuralGenome) -> f32 {
    let (a, b) = (g1.len(), g2.len());
    let longest = a.max(b);
    if longest == 0 {
        0.0
    } else {
        a.abs_diff(b) as f32 / longest as f32
    }
}
