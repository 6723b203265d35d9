//! Per-generation population statistics and plateau detection.

use crate::schema::{GenerationRecord, StructuralGenome};

use super::genome::genome_distance;

/// Summarize a scored population.
pub fn generation_record(generation: usize, population: &[StructuralGenome]) -> GenerationRecord {
    let (mean_fitness, best_fitness) = if population.is_empty() {
        (0.0, 0.0)
    } else {
        let sum: f32 = population.iter().map(StructuralGenome::score).sum();
        let best = population
            .iter()
            .map(StructuralGenome::score)
            .fold(f32::NEG_INFINITY, f32::max);
        (sum / population.len() as f32, best)
    };

    GenerationRecord {
        generation,
        mean_fitness,
        best_fitness,
        diversity: diversity(population),
    }
}

/// Mean pairwise genome distance.
pub fn diversity(population: &[StructuralGenome]) -> f32 {
    if population.len() < 2 {
        return 0.0;
    }

    let mut total_distance = 0.0f32;
    let mut count = 0usize;
    for i in 0..population.len() {
        for j in (i + 1)..population.len() {
            total_distance += genome_distance(&population[i], &population[j]);
            count += 1;
        }
    }
    total_distance / count as f32
}

/// Mean per-generation change in best fitness over the whole history.
pub fn convergence_rate(history: &[GenerationRecord]) -> f32 {
    match (history.first(), history.last()) {
        (Some(first), Some(last)) if history.len() > 1 => {
            (last.best_fitness - first.best_fitness) / (history.len() - 1) as f32
        }
        _ => 0.0,
    }
}

/// Signals a plateau in best fitness.
///
/// Only the first and last entries of the trailing window are compared.
#[derive(Debug, Clone, Copy)]
pub struct ConvergenceMonitor {
    /// Generations inspected.
    pub window: usize,
    /// Minimum improvement across the window to keep going.
    pub threshold: f32,
}

impl Default for ConvergenceMonitor {
    fn default() -> Self {
        Self {
            window: 10,
            threshold: 0.01,
        }
    }
}

impl ConvergenceMonitor {
    /// Whether the trailing window improved by less than the threshold.
    pub fn has_converged(&self, history: &[GenerationRecord]) -> bool {
        if self.window == 0 || history.len() < self.window {
            return false;
        }
        let window = &history[history.len() - self.window..];
        let improvement = window[window.len() - 1].best_fitness - window[0].best_fitness;
        improvement < self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evolution::GenomeRng;

    fn history(best: &[f32]) -> Vec<GenerationRecord> {
        best.iter()
            .enumerate()
            .map(|(generation, &best_fitness)| GenerationRecord {
                generation,
                mean_fitness: best_fitness / 2.0,
                best_fitness,
                diversity: 0.0,
            })
            .collect()
    }

    #[test]
    fn test_generation_record() {
        let population: Vec<StructuralGenome> = [0.2, 0.4, 0.9]
            .iter()
            .map(|&f| StructuralGenome {
                fitness: Some(f),
                ..Default::default()
            })
            .collect();
        let record = generation_record(4, &population);
        assert_eq!(record.generation, 4);
        assert!((record.mean_fitness - 0.5).abs() < 1e-6);
        assert_eq!(record.best_fitness, 0.9);
        assert_eq!(record.diversity, 0.0);
    }

    #[test]
    fn test_diversity_of_mixed_sizes() {
        let mut rng = GenomeRng::new(8);
        let genes: Vec<_> = (0..4).map(|_| rng.random_gene()).collect();
        let population = vec![
            StructuralGenome::new(genes.clone(), 0),
            StructuralGenome::new(genes[..2].to_vec(), 0),
        ];
        assert!((diversity(&population) - 0.5).abs() < 1e-6);
        assert_eq!(diversity(&population[..1]), 0.0);
    }

    #[test]
    fn test_monitor_needs_full_window() {
        let monitor = ConvergenceMonitor::default();
        assert!(!monitor.has_converged(&history(&[0.5; 9])));
        assert!(monitor.has_converged(&history(&[0.5; 10])));
    }

    #[test]
    fn test_monitor_detects_progress() {
        let monitor = ConvergenceMonitor::default();
        let improving: Vec<f32> = (0..12).map(|i| i as f32 * 0.01).collect();
        assert!(!monitor.has_converged(&history(&improving)));

        let mut stalled = improving.clone();
        stalled.extend([0.11; 10]);
        assert!(monitor.has_converged(&history(&stalled)));
    }

    #[test]
    fn test_convergence_rate() {
        assert_eq!(convergence_rate(&history(&[0.3])), 0.0);
        assert!((convergence_rate(&history(&[0.1, 0.2, 0.5])) - 0.2).abs() < 1e-6);
        assert_eq!(convergence_rate(&[]), 0.0);
    }
}
