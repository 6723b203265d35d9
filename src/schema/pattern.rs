//! Biomimicry pattern catalog and generator parameters.

use serde::{Deserialize, Serialize};

/// Catalog entry for a pattern generator.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PatternInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub natural_source: &'static str,
    pub applications: &'static [&'static str],
}

/// The four pattern generators. The catalog is fixed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    Honeycomb,
    SpiderWeb,
    TrabecularBone,
    TreeBranching,
}

impl PatternKind {
    /// Catalog order.
    pub const ALL: [PatternKind; 4] = [
        PatternKind::Honeycomb,
        PatternKind::SpiderWeb,
        PatternKind::TrabecularBone,
        PatternKind::TreeBranching,
    ];

    /// Resolve a pattern by name. Case-insensitive, accepts common aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "honeycomb" | "hexagon" | "hexagonal" => Some(Self::Honeycomb),
            "spider-web" | "spiderweb" | "spider" | "web" => Some(Self::SpiderWeb),
            "trabecular-bone" | "trabecular" | "bone" => Some(Self::TrabecularBone),
            "tree-branching" | "tree" | "fractal-tree" | "branching" => Some(Self::TreeBranching),
            _ => None,
        }
    }

    /// Resolve the pattern an organism evokes, if any.
    pub fn from_organism(organism: &str) -> Option<Self> {
        let organism = organism.to_ascii_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| organism.contains(w));

        if has(&["bee", "wasp", "honeycomb", "hive"]) {
            Some(Self::Honeycomb)
        } else if has(&["spider", "web"]) {
            Some(Self::SpiderWeb)
        } else if has(&["bone", "trabecul", "skeleton"]) {
            Some(Self::TrabecularBone)
        } else if has(&["tree", "branch", "oak", "coral"]) {
            Some(Self::TreeBranching)
        } else {
            None
        }
    }

    /// Static metadata for this pattern.
    pub fn info(self) -> PatternInfo {
        match self {
            Self::Honeycomb => PatternInfo {
                name: "Honeycomb",
                description: "Hexagonal cell tiling with maximal strength-to-weight ratio",
                natural_source: "Honeybee comb",
                applications: &["facade panels", "lightweight floors", "sandwich cores"],
            },
            Self::SpiderWeb => PatternInfo {
                name: "Spider Web",
                description: "Radial spokes bound by concentric rings for tensile spans",
                natural_source: "Orb-weaver spider web",
                applications: &["cable roofs", "tensile canopies", "bridge stays"],
            },
            Self::TrabecularBone => PatternInfo {
                name: "Trabecular Bone",
                description: "Stress-adaptive porous lattice densest where load concentrates",
                natural_source: "Cancellous bone",
                applications: &["lattice infill", "load-adaptive columns", "3D-printed nodes"],
            },
            Self::TreeBranching => PatternInfo {
                name: "Tree Branching",
                description: "Fractal branching columns spreading load from a single trunk",
                natural_source: "Tree crowns",
                applications: &["dendriform columns", "canopy supports", "atrium roofs"],
            },
        }
    }

    /// Attach parameters parsed from a JSON object. Missing fields use defaults.
    pub fn with_params(
        self,
        params: &serde_json::Value,
    ) -> Result<BionicPattern, serde_json::Error> {
        let params = if params.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            params.clone()
        };

        Ok(match self {
            Self::Honeycomb => BionicPattern::Honeycomb(serde_json::from_value(params)?),
            Self::SpiderWeb => BionicPattern::SpiderWeb(serde_json::from_value(params)?),
            Self::TrabecularBone => BionicPattern::TrabecularBone(serde_json::from_value(params)?),
            Self::TreeBranching => BionicPattern::TreeBranching(serde_json::from_value(params)?),
        })
    }
}

/// A pattern generator together with its shape parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum BionicPattern {
    Honeycomb(HoneycombParams),
    SpiderWeb(SpiderWebParams),
    TrabecularBone(BoneParams),
    TreeBranching(TreeParams),
}

impl BionicPattern {
    /// Which generator this is.
    pub fn kind(&self) -> PatternKind {
        match self {
            Self::Honeycomb(_) => PatternKind::Honeycomb,
            Self::SpiderWeb(_) => PatternKind::SpiderWeb,
            Self::TrabecularBone(_) => PatternKind::TrabecularBone,
            Self::TreeBranching(_) => PatternKind::TreeBranching,
        }
    }
}

/// Hexagonal shell tiling over a rectangle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HoneycombParams {
    #[serde(default = "default_panel_extent")]
    pub width: f32,
    #[serde(default = "default_panel_extent")]
    pub height: f32,
    /// Hexagon circumradius.
    #[serde(default = "default_cell_size", alias = "cellSize")]
    pub cell_size: f32,
}

impl Default for HoneycombParams {
    fn default() -> Self {
        Self {
            width: default_panel_extent(),
            height: default_panel_extent(),
            cell_size: default_cell_size(),
        }
    }
}

fn default_panel_extent() -> f32 {
    20.0
}
fn default_cell_size() -> f32 {
    1.0
}

/// Radial spokes and concentric rings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpiderWebParams {
    #[serde(default = "default_web_radius")]
    pub radius: f32,
    #[serde(default = "default_spokes")]
    pub spokes: usize,
    #[serde(default = "default_rings")]
    pub rings: usize,
}

impl Default for SpiderWebParams {
    fn default() -> Self {
        Self {
            radius: default_web_radius(),
            spokes: default_spokes(),
            rings: default_rings(),
        }
    }
}

fn default_web_radius() -> f32 {
    10.0
}
fn default_spokes() -> usize {
    12
}
fn default_rings() -> usize {
    6
}

/// Stress-driven lattice inside a bounding box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoneParams {
    /// Bounding box extents (x, y, z). Y is vertical.
    #[serde(default = "default_bone_volume")]
    pub volume: [f32; 3],
    /// Lattice points per unit length.
    #[serde(default = "default_bone_density")]
    pub density: f32,
}

impl Default for BoneParams {
    fn default() -> Self {
        Self {
            volume: default_bone_volume(),
            density: default_bone_density(),
        }
    }
}

fn default_bone_volume() -> [f32; 3] {
    [10.0, 10.0, 10.0]
}
fn default_bone_density() -> f32 {
    0.5
}

/// Fractal branching from a single trunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeParams {
    /// Trunk length.
    #[serde(default = "default_tree_height")]
    pub height: f32,
    /// Children per branch.
    #[serde(default = "default_branches")]
    pub branches: usize,
    /// Recursion depth below the trunk.
    #[serde(default = "default_levels")]
    pub levels: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            height: default_tree_height(),
            branches: default_branches(),
            levels: default_levels(),
        }
    }
}

fn default_tree_height() -> f32 {
    10.0
}
fn default_branches() -> usize {
    3
}
fn default_levels() -> usize {
    3
}
