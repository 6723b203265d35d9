//! Structural genome types and design intent.
//!
//! A design is an ordered list of [`Gene`]s, each one structural primitive
//! (column, beam, brace, shell, membrane) with placement, size and material.

use std::collections::BTreeMap;
use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// 3-component vector (x, y, z). +Y is vertical.
pub type Vec3 = [f32; 3];

/// Thickness assumed when a gene does not carry one.
pub const DEFAULT_THICKNESS: f32 = 0.1;

/// Lower bound on any gene volume, keeps costs strictly positive.
pub const MIN_GENE_VOLUME: f32 = 1e-6;

/// Property key marking a circular brace (spider web rings).
pub const RING_PROPERTY: &str = "is_ring";

/// Kind of structural primitive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GeneKind {
    Column,
    Beam,
    Brace,
    Shell,
    Membrane,
}

impl GeneKind {
    /// All kinds, in declaration order.
    pub const ALL: [GeneKind; 5] = [
        GeneKind::Column,
        GeneKind::Beam,
        GeneKind::Brace,
        GeneKind::Shell,
        GeneKind::Membrane,
    ];

    /// Linear members carry load along an axis.
    #[inline]
    pub fn is_rod(self) -> bool {
        matches!(self, GeneKind::Column | GeneKind::Beam | GeneKind::Brace)
    }

    /// Surface members enclose space.
    #[inline]
    pub fn is_surface(self) -> bool {
        matches!(self, GeneKind::Shell | GeneKind::Membrane)
    }
}

/// Sparse dimension record. Only the fields relevant to a gene kind are set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
}

impl Dimensions {
    /// First populated field in declaration order, mutably.
    pub fn first_mut(&mut self) -> Option<&mut f32> {
        [
            &mut self.length,
            &mut self.width,
            &mut self.height,
            &mut self.thickness,
            &mut self.radius,
        ]
        .into_iter()
        .find_map(|field| field.as_mut())
    }
}

/// One structural primitive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Gene {
    /// Primitive kind.
    pub kind: GeneKind,
    /// Base point.
    pub position: Vec3,
    /// Angles in radians: [inclination from +Y, roll, azimuth around +Y].
    pub orientation: Vec3,
    /// Size of the primitive.
    pub dimensions: Dimensions,
    /// Material identifier (e.g. "steel", "titanium").
    pub material: String,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl Gene {
    /// Create a gene with no tags.
    pub fn new(
        kind: GeneKind,
        position: Vec3,
        orientation: Vec3,
        dimensions: Dimensions,
        material: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            position,
            orientation,
            dimensions,
            material: material.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Attach a tag.
    pub fn with_property(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Whether this gene is a circular brace.
    pub fn is_ring(&self) -> bool {
        self.properties
            .get(RING_PROPERTY)
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }

    /// Unit vector along the member axis, derived from orientation.
    pub fn axis(&self) -> Vec3 {
        let [inclination, _, azimuth] = self.orientation;
        [
            inclination.sin() * azimuth.cos(),
            inclination.cos(),
            inclination.sin() * azimuth.sin(),
        ]
    }

    /// Approximate material volume.
    pub fn volume(&self) -> f32 {
        let d = &self.dimensions;
        let thickness = d.thickness.unwrap_or(DEFAULT_THICKNESS);

        let volume = if self.kind.is_rod() {
            if self.is_ring() {
                2.0 * PI * d.radius.unwrap_or(1.0) * thickness * thickness
            } else {
                d.length.unwrap_or(1.0)
                    * d.width.unwrap_or(thickness)
                    * d.height.unwrap_or(thickness)
            }
        } else {
            match (d.radius, d.length, d.width) {
                (Some(r), _, _) => PI * r * r * thickness,
                (None, Some(l), Some(w)) => l * w * thickness,
                (None, l, w) => l.or(w).unwrap_or(1.0) * thickness,
            }
        };

        if volume.is_finite() {
            volume.abs().max(MIN_GENE_VOLUME)
        } else {
            MIN_GENE_VOLUME
        }
    }
}

/// One candidate structural design.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StructuralGenome {
    /// Ordered structural primitives.
    pub genes: Vec<Gene>,
    /// Combined fitness once scored.
    #[serde(default)]
    pub fitness: Option<f32>,
    /// Generation this genome was produced in.
    #[serde(default)]
    pub generation: usize,
}

impl StructuralGenome {
    /// Unscored genome at the given generation.
    pub fn new(genes: Vec<Gene>, generation: usize) -> Self {
        Self {
            genes,
            fitness: None,
            generation,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Fitness for ranking; unscored genomes rank as zero.
    #[inline]
    pub fn score(&self) -> f32 {
        self.fitness.unwrap_or(0.0)
    }
}

/// Sub-scores and combined fitness of one genome.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FitnessMetrics {
    /// Share of load-bearing volume (0.0-1.0).
    pub structural_efficiency: f32,
    /// Absolute material cost in currency units.
    pub material_cost: f32,
    /// Envelope coverage (0.0-1.0).
    pub thermal_performance: f32,
    /// Smooth-surface share (0.0-1.0).
    pub aerodynamic_efficiency: f32,
    /// Symmetry and proportion (0.0-1.0).
    pub aesthetic_score: f32,
    /// Objective-weighted scalar used for selection.
    pub overall_fitness: f32,
}

/// What the optimizer should favour.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectiveFunction {
    Structural,
    Thermal,
    Aerodynamic,
    Aesthetic,
    #[default]
    MultiObjective,
}

/// Design constraints. Only `max_cost` affects fitness; the rest are
/// carried through for the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DesignConstraints {
    #[serde(default)]
    pub max_weight: Option<f32>,
    #[serde(default)]
    pub max_cost: Option<f32>,
    #[serde(default)]
    pub min_strength: Option<f32>,
    #[serde(default)]
    pub material_types: Vec<String>,
    #[serde(default)]
    pub building_codes: Vec<String>,
}

impl DesignConstraints {
    /// Names of constraints that are set but have no effect on fitness.
    pub fn unenforced(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.max_weight.is_some() {
            names.push("max_weight");
        }
        if self.min_strength.is_some() {
            names.push("min_strength");
        }
        if !self.material_types.is_empty() {
            names.push("material_types");
        }
        if !self.building_codes.is_empty() {
            names.push("building_codes");
        }
        names
    }
}

/// Organism used to seed the initial population.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiomimicryReference {
    /// Organism name, e.g. "honeybee" or "oak tree".
    pub organism: String,
    /// Descriptive tags.
    #[serde(default)]
    pub characteristics: Vec<String>,
}

/// Intent of one optimization run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BionicDesignParams {
    #[serde(default)]
    pub objective_function: ObjectiveFunction,
    #[serde(default)]
    pub constraints: DesignConstraints,
    #[serde(default)]
    pub biomimicry_reference: Option<BiomimicryReference>,
}
