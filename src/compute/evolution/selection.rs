//! Parent selection strategies.

use rand::Rng;

use crate::schema::{SelectionMethod, StructuralGenome};

/// Individuals sampled per tournament.
pub const TOURNAMENT_SIZE: usize = 3;

/// Pick `count` parents (cloned) from a scored population.
pub fn select_parents<R: Rng + ?Sized>(
    population: &[StructuralGenome],
    method: SelectionMethod,
    count: usize,
    rng: &mut R,
) -> Vec<StructuralGenome> {
    if population.is_empty() {
        return Vec::new();
    }

    let ranked = match method {
        SelectionMethod::Rank => ranking(population),
        _ => Vec::new(),
    };

    (0..count)
        .map(|_| {
            let idx = match method {
                SelectionMethod::Tournament => tournament_index(population, rng),
                SelectionMethod::Roulette => roulette_index(population, rng),
                SelectionMethod::Rank => rank_index(&ranked, rng),
            };
            population[idx].clone()
        })
        .collect()
}

/// Best of [`TOURNAMENT_SIZE`] uniform picks, with replacement.
fn tournament_index<R: Rng + ?Sized>(population: &[StructuralGenome], rng: &mut R) -> usize {
    let mut best_idx = rng.gen_range(0..population.len());
    for _ in 1..TOURNAMENT_SIZE {
        let idx = rng.gen_range(0..population.len());
        if population[idx].score() > population[best_idx].score() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Fitness-proportionate. Negative fitness counts as zero; an all-zero
/// population is sampled uniformly.
fn roulette_index<R: Rng + ?Sized>(population: &[StructuralGenome], rng: &mut R) -> usize {
    let total: f32 = population.iter().map(|g| g.score().max(0.0)).sum();
    if !(total > 0.0) {
        return rng.gen_range(0..population.len());
    }

    let target = rng.r#gen::<f32>() * total;
    let mut cumulative = 0.0;
    for (i, genome) in population.iter().enumerate() {
        cumulative += genome.score().max(0.0);
        if cumulative > target {
            return i;
        }
    }
    population.len() - 1
}

/// Indices sorted by descending fitness.
fn ranking(population: &[StructuralGenome]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| population[b].score().total_cmp(&population[a].score()));
    order
}

/// Quadratic bias toward the top of the ranking.
fn rank_index<R: Rng + ?Sized>(ranked: &[usize], rng: &mut R) -> usize {
    let r = rng.r#gen::<f32>();
    let position = ((r * r * ranked.len() as f32) as usize).min(ranked.len() - 1);
    ranked[position]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scored(fitness: &[f32]) -> Vec<StructuralGenome> {
        fitness
            .iter()
            .enumerate()
            .map(|(i, &f)| StructuralGenome {
                genes: Vec::new(),
                fitness: Some(f),
                generation: i,
            })
            .collect()
    }

    fn mean_fitness(parents: &[StructuralGenome]) -> f32 {
        parents.iter().map(StructuralGenome::score).sum::<f32>() / parents.len() as f32
    }

    #[test]
    fn test_exact_parent_count() {
        let population = scored(&[0.1, 0.5, 0.9]);
        let mut rng = StdRng::seed_from_u64(1);
        for method in [
            SelectionMethod::Tournament,
            SelectionMethod::Roulette,
            SelectionMethod::Rank,
        ] {
            assert_eq!(select_parents(&population, method, 7, &mut rng).len(), 7);
        }
    }

    #[test]
    fn test_selection_pressure() {
        let population = scored(&(0..20).map(|i| i as f32 / 20.0).collect::<Vec<_>>());
        let baseline = mean_fitness(&population);
        let mut rng = StdRng::seed_from_u64(2);

        for method in [
            SelectionMethod::Tournament,
            SelectionMethod::Roulette,
            SelectionMethod::Rank,
        ] {
            let parents = select_parents(&population, method, 2000, &mut rng);
            assert!(mean_fitness(&parents) > baseline, "{method:?} has no pressure");
        }
    }

    #[test]
    fn test_roulette_all_zero_is_uniform() {
        let population = scored(&[0.0; 4]);
        let mut rng = StdRng::seed_from_u64(3);
        let parents = select_parents(&population, SelectionMethod::Roulette, 400, &mut rng);

        for generation in 0..4 {
            let hits = parents.iter().filter(|p| p.generation == generation).count();
            assert!(hits > 50, "index {generation} picked {hits} times");
        }
    }

    #[test]
    fn test_roulette_ignores_negative() {
        let population = scored(&[-5.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(4);
        let parents = select_parents(&population, SelectionMethod::Roulette, 100, &mut rng);
        assert!(parents.iter().all(|p| p.generation == 1));
    }

    #[test]
    fn test_empty_population() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(select_parents(&[], SelectionMethod::Tournament, 3, &mut rng).is_empty());
    }
}
