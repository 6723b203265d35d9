//! Biomimicry pattern generators.
//!
//! Each generator maps shape parameters to a gene sequence. Only the
//! trabecular bone lattice draws random numbers; the others ignore the RNG.

use std::f32::consts::{FRAC_PI_4, PI};

use rand::Rng;

use crate::schema::{
    BionicPattern, BoneParams, Dimensions, Gene, GeneKind, HoneycombParams, RING_PROPERTY,
    SpiderWebParams, TreeParams, Vec3,
};

/// Hard ceiling on genes emitted by a single generator call.
pub const MAX_PATTERN_GENES: usize = 20_000;

/// Shell thickness used for honeycomb cells.
const HONEYCOMB_THICKNESS: f32 = 0.05;
/// Branch length and thickness ratio between parent and child.
const BRANCH_SCALE: f32 = 0.7;
/// Recursion bound for tree branching.
const MAX_TREE_LEVELS: usize = 32;

impl BionicPattern {
    /// Generate the gene sequence for this pattern.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Gene> {
        match self {
            Self::Honeycomb(p) => honeycomb(p),
            Self::SpiderWeb(p) => spider_web(p),
            Self::TrabecularBone(p) => trabecular_bone(p, rng),
            Self::TreeBranching(p) => tree_branching(p),
        }
    }
}

/// Lattice points at `pitch` spacing within `[0, extent]`, capped at the gene ceiling.
fn grid_points(extent: f32, pitch: f32) -> usize {
    ((extent / pitch).floor() as usize).min(MAX_PATTERN_GENES) + 1
}

/// Hexagonal tiling of `shell` cells over a `width` x `height` panel.
pub fn honeycomb(params: &HoneycombParams) -> Vec<Gene> {
    let HoneycombParams {
        width,
        height,
        cell_size,
    } = *params;
    if !(cell_size > 0.0) || !(width >= 0.0) || !(height >= 0.0) {
        return Vec::new();
    }

    let row_pitch = cell_size * 3f32.sqrt();
    let col_pitch = cell_size * 1.5;
    let rows = grid_points(height, row_pitch);

    let mut genes = Vec::new();
    'rows: for row in 0..rows {
        let y = row as f32 * row_pitch;
        let offset = if row % 2 == 1 { col_pitch * 0.5 } else { 0.0 };
        if offset > width {
            continue;
        }
        let cols = grid_points(width - offset, col_pitch);

        for col in 0..cols {
            if genes.len() >= MAX_PATTERN_GENES {
                break 'rows;
            }
            let x = offset + col as f32 * col_pitch;
            genes.push(Gene::new(
                GeneKind::Shell,
                [x, y, 0.0],
                [0.0; 3],
                Dimensions {
                    radius: Some(cell_size),
                    thickness: Some(HONEYCOMB_THICKNESS),
                    ..Default::default()
                },
                "aluminum",
            ));
        }
    }
    genes
}

/// Radial spokes plus concentric rings, centred on the origin.
pub fn spider_web(params: &SpiderWebParams) -> Vec<Gene> {
    let SpiderWebParams {
        radius,
        spokes,
        rings,
    } = *params;
    if !(radius > 0.0) {
        return Vec::new();
    }

    let spokes = spokes.min(MAX_PATTERN_GENES);
    let rings = rings.min(MAX_PATTERN_GENES - spokes);
    let mut genes = Vec::with_capacity(spokes + rings);

    for i in 0..spokes {
        let azimuth = 2.0 * PI * i as f32 / spokes as f32;
        let mid = radius * 0.5;
        genes.push(Gene::new(
            GeneKind::Brace,
            [mid * azimuth.cos(), 0.0, mid * azimuth.sin()],
            [PI / 2.0, 0.0, azimuth],
            Dimensions {
                length: Some(radius),
                thickness: Some(0.02),
                ..Default::default()
            },
            "steel-cable",
        ));
    }

    for k in 1..=rings {
        genes.push(
            Gene::new(
                GeneKind::Brace,
                [0.0; 3],
                [PI / 2.0, 0.0, 0.0],
                Dimensions {
                    radius: Some(k as f32 / rings as f32 * radius),
                    thickness: Some(0.01),
                    ..Default::default()
                },
                "steel-cable",
            )
            .with_property(RING_PROPERTY, true),
        );
    }
    genes
}

/// Local stress heuristic: high near the base and near the lateral faces.
pub fn bone_stress(point: Vec3, volume: [f32; 3]) -> f32 {
    let [x, y, z] = point;
    let [w, h, d] = volume;
    let vertical = if h > 0.0 { 1.0 - y / h } else { 1.0 };
    let edge_distance = x.min(w - x).min(z).min(d - z).max(0.0);
    (0.7 * vertical + 0.3 / (1.0 + edge_distance)).clamp(0.0, 1.0)
}

/// Stress-adaptive brace lattice. Each lattice point is kept with
/// probability equal to its local stress.
pub fn trabecular_bone<R: Rng + ?Sized>(params: &BoneParams, rng: &mut R) -> Vec<Gene> {
    let BoneParams { volume, density } = *params;
    if !(density > 0.0) || volume.iter().any(|v| !(*v >= 0.0)) {
        return Vec::new();
    }

    let step = 1.0 / density;
    let (nx, ny, nz) = (
        grid_points(volume[0], step),
        grid_points(volume[1], step),
        grid_points(volume[2], step),
    );

    let mut genes = Vec::new();
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                if genes.len() >= MAX_PATTERN_GENES {
                    return genes;
                }
                let point = [i as f32 * step, j as f32 * step, k as f32 * step];
                let stress = bone_stress(point, volume);
                if rng.r#gen::<f32>() < stress {
                    genes.push(Gene::new(
                        GeneKind::Brace,
                        point,
                        [0.0; 3],
                        Dimensions {
                            length: Some(step),
                            thickness: Some(0.02 + 0.1 * stress),
                            ..Default::default()
                        },
                        "titanium",
                    ));
                }
            }
        }
    }
    genes
}

/// Fractal tree: a trunk column and `levels` tiers of branches on a 45° cone.
pub fn tree_branching(params: &TreeParams) -> Vec<Gene> {
    let TreeParams {
        height,
        branches,
        levels,
    } = *params;
    if !(height > 0.0) {
        return Vec::new();
    }

    let trunk = Gene::new(
        GeneKind::Column,
        [0.0; 3],
        [0.0; 3],
        Dimensions {
            length: Some(height),
            thickness: Some(height * 0.05),
            ..Default::default()
        },
        "timber",
    );
    let mut genes = vec![trunk.clone()];
    grow(&trunk, 1, branches, levels.min(MAX_TREE_LEVELS), &mut genes);
    genes
}

fn grow(parent: &Gene, level: usize, branches: usize, levels: usize, genes: &mut Vec<Gene>) {
    if level > levels || branches == 0 {
        return;
    }

    let length = parent.dimensions.length.unwrap_or(0.0);
    let axis = parent.axis();
    let tip = [
        parent.position[0] + axis[0] * length,
        parent.position[1] + axis[1] * length,
        parent.position[2] + axis[2] * length,
    ];
    let parent_azimuth = parent.orientation[2];

    for i in 0..branches {
        if genes.len() >= MAX_PATTERN_GENES {
            return;
        }
        let azimuth = parent_azimuth + 2.0 * PI * i as f32 / branches as f32;
        let child = Gene::new(
            GeneKind::Beam,
            tip,
            [FRAC_PI_4, 0.0, azimuth],
            Dimensions {
                length: Some(length * BRANCH_SCALE),
                thickness: parent.dimensions.thickness.map(|t| t * BRANCH_SCALE),
                ..Default::default()
            },
            "timber",
        );
        genes.push(child.clone());
        grow(&child, level + 1, branches, levels, genes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_honeycomb_cells() {
        let genes = honeycomb(&HoneycombParams {
            width: 10.0,
            height: 10.0,
            cell_size: 1.0,
        });
        assert!(!genes.is_empty());
        for gene in &genes {
            assert_eq!(gene.kind, GeneKind::Shell);
            assert_eq!(gene.material, "aluminum");
            assert_eq!(gene.dimensions.radius, Some(1.0));
            assert_eq!(gene.dimensions.thickness, Some(HONEYCOMB_THICKNESS));
        }
    }

    #[test]
    fn test_honeycomb_scales_with_area() {
        let small = honeycomb(&HoneycombParams {
            width: 10.0,
            height: 10.0,
            cell_size: 1.0,
        });
        let large = honeycomb(&HoneycombParams {
            width: 20.0,
            height: 20.0,
            cell_size: 1.0,
        });
        let scaled = honeycomb(&HoneycombParams {
            width: 20.0,
            height: 20.0,
            cell_size: 2.0,
        });
        assert!(large.len() >= small.len() * 3);
        assert_eq!(scaled.len(), small.len());
    }

    #[test]
    fn test_honeycomb_degenerate_cell() {
        let genes = honeycomb(&HoneycombParams {
            width: 10.0,
            height: 10.0,
            cell_size: 0.0,
        });
        assert!(genes.is_empty());
    }

    #[test]
    fn test_spider_web_structure() {
        let genes = spider_web(&SpiderWebParams {
            radius: 8.0,
            spokes: 10,
            rings: 4,
        });
        assert_eq!(genes.len(), 14);
        assert!(genes.iter().all(|g| g.kind == GeneKind::Brace));
        assert!(genes.iter().all(|g| g.material == "steel-cable"));

        let rings: Vec<_> = genes.iter().filter(|g| g.is_ring()).collect();
        assert_eq!(rings.len(), 4);
        assert_eq!(rings[0].dimensions.radius, Some(2.0));
        assert_eq!(rings[3].dimensions.radius, Some(8.0));

        let spokes: Vec<_> = genes.iter().filter(|g| !g.is_ring()).collect();
        assert!(spokes.iter().all(|g| g.dimensions.length == Some(8.0)));
    }

    #[test]
    fn test_bone_stress_bounds() {
        let volume = [5.0, 5.0, 5.0];
        assert!((bone_stress([2.5, 0.0, 0.0], volume) - 1.0).abs() < 1e-6);
        let top_center = bone_stress([2.5, 5.0, 2.5], volume);
        assert!(top_center > 0.0 && top_center < 0.1);
    }

    #[test]
    fn test_bone_is_seed_deterministic() {
        let params = BoneParams {
            volume: [5.0, 5.0, 5.0],
            density: 0.8,
        };
        let a = trabecular_bone(&params, &mut StdRng::seed_from_u64(7));
        let b = trabecular_bone(&params, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.iter().all(|g| g.material == "titanium"));
    }

    #[test]
    fn test_bone_density_increases_genes() {
        let mut rng = StdRng::seed_from_u64(11);
        let trials = 20;
        let count = |density: f32, rng: &mut StdRng| -> usize {
            (0..trials)
                .map(|_| {
                    trabecular_bone(
                        &BoneParams {
                            volume: [5.0, 5.0, 5.0],
                            density,
                        },
                        rng,
                    )
                    .len()
                })
                .sum()
        };
        let sparse = count(0.2, &mut rng);
        let dense = count(0.8, &mut rng);
        assert!(dense > sparse);
    }

    #[test]
    fn test_tree_gene_count() {
        let genes = tree_branching(&TreeParams {
            height: 10.0,
            branches: 3,
            levels: 3,
        });
        assert_eq!(genes.len(), 1 + 3 + 9 + 27);
        assert_eq!(genes[0].kind, GeneKind::Column);
        assert_eq!(genes[0].dimensions.length, Some(10.0));

        let first_branch = &genes[1];
        assert!((first_branch.dimensions.length.unwrap() - 7.0).abs() < 1e-5);
        assert!((first_branch.position[1] - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_grid_points_saturate() {
        assert_eq!(grid_points(10.0, 1.0), 11);
        assert_eq!(grid_points(1e30, 1e-10), MAX_PATTERN_GENES + 1);
        assert_eq!(grid_points(f32::INFINITY, 1.0), MAX_PATTERN_GENES + 1);
    }

    #[test]
    fn test_tree_ceiling() {
        let genes = tree_branching(&TreeParams {
            height: 10.0,
            branches: 10,
            levels: 10,
        });
        assert_eq!(genes.len(), MAX_PATTERN_GENES);
    }
}
