//! Genetic algorithm driver.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rayon::prelude::*;

use crate::schema::{
    BionicDesignParams, EvolutionPhase, EvolutionProgress, FitnessMetrics, GenerationRecord,
    GeneticAlgorithmConfig, SimulationResult, StopReason, StructuralGenome,
};

use super::fitness::FitnessEvaluator;
use super::genome::GenomeRng;
use super::selection::select_parents;
use super::stats::{ConvergenceMonitor, convergence_rate, generation_record};
use super::synthesis::synthesize;

/// Errors that abort an optimization run.
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] crate::schema::ConfigError),
    #[error("Optimization cancelled after generation {generation}")]
    Cancelled { generation: usize },
}

/// Runs started by this process, for id uniqueness.
static RUN_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fresh run identifier: `sim-<unix millis>-<process counter>-<random hex>`.
pub fn next_run_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    let counter = RUN_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix: u32 = rand::random();
    format!("sim-{millis}-{counter}-{suffix:08x}")
}

/// Evolution engine that runs one optimization.
pub struct EvolutionEngine {
    params: BionicDesignParams,
    config: GeneticAlgorithmConfig,
    rng: GenomeRng,
    evaluator: FitnessEvaluator,
    monitor: ConvergenceMonitor,
    population: Vec<StructuralGenome>,
    history: Vec<GenerationRecord>,
    generation: usize,
    cancelled: Arc<AtomicBool>,
}

impl EvolutionEngine {
    /// Create a new evolution engine. Fails on an invalid configuration.
    pub fn new(
        params: BionicDesignParams,
        config: GeneticAlgorithmConfig,
    ) -> Result<Self, OptimizeError> {
        config.validate()?;

        let rng = match config.random_seed {
            Some(seed) => GenomeRng::new(seed),
            None => GenomeRng::random(),
        };
        let evaluator = FitnessEvaluator::from_params(&params);

        Ok(Self {
            params,
            config,
            rng,
            evaluator,
            monitor: ConvergenceMonitor::default(),
            population: Vec::new(),
            history: Vec::new(),
            generation: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Replace the plateau detector.
    pub fn with_monitor(mut self, monitor: ConvergenceMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    /// Get cancellation handle. Checked between generations only.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Current population.
    pub fn population(&self) -> &[StructuralGenome] {
        &self.population
    }

    /// Initialize the population.
    pub fn initialize(&mut self) {
        self.generation = 0;
        self.history.clear();
        self.population = self
            .rng
            .initialize_population(&self.params, self.config.population_size);
    }

    /// Score every genome. Returns metrics in population order.
    fn evaluate_population(&mut self) -> Vec<FitnessMetrics> {
        let evaluator = &self.evaluator;

        let metrics: Vec<FitnessMetrics> = self
            .population
            .par_iter()
            .map(|genome| evaluator.evaluate(genome))
            .collect();

        for (genome, m) in self.population.iter_mut().zip(&metrics) {
            genome.fitness = Some(m.overall_fitness);
        }
        metrics
    }

    /// Build the next generation from the scored population.
    fn step_generation(&mut self) {
        let size = self.config.population_size;
        let next_generation = self.generation + 1;

        // Elitism: keep best individuals verbatim
        let mut ranked: Vec<&StructuralGenome> = self.population.iter().collect();
        ranked.sort_by(|a, b| b.score().total_cmp(&a.score()));
        let mut next_gen: Vec<StructuralGenome> = ranked
            .into_iter()
            .take(self.config.elite_count())
            .cloned()
            .collect();

        let parents = select_parents(
            &self.population,
            self.config.selection_method,
            size,
            self.rng.rng_mut(),
        );

        let mut offspring = Vec::with_capacity(parents.len());
        for pair in parents.chunks(2) {
            let children = match pair {
                [a, b] if self.rng.chance(self.config.crossover_rate) => {
                    let (c1, c2) = self.rng.crossover(a, b, next_generation);
                    vec![c1, c2]
                }
                _ => pair
                    .iter()
                    .map(|p| StructuralGenome::new(p.genes.clone(), next_generation))
                    .collect(),
            };

            for child in children {
                let child = if self.rng.chance(self.config.mutation_rate) {
                    self.rng.mutate(child)
                } else {
                    child
                };
                offspring.push(child);
            }
        }

        let remaining = size.saturating_sub(next_gen.len());
        next_gen.extend(offspring.into_iter().take(remaining));

        self.population = next_gen;
        self.generation = next_generation;
    }

    fn progress(&self, phase: EvolutionPhase) -> EvolutionProgress {
        let record = self.history.last().copied();
        EvolutionProgress {
            generation: self.generation,
            total_generations: self.config.generations,
            best_fitness: record.map_or(0.0, |r| r.best_fitness),
            mean_fitness: record.map_or(0.0, |r| r.mean_fitness),
            diversity: record.map_or(0.0, |r| r.diversity),
            phase,
        }
    }

    /// Run the optimization with a progress callback.
    pub fn run_with_callback<F>(
        &mut self,
        project_id: &str,
        callback: F,
    ) -> Result<SimulationResult, OptimizeError>
    where
        F: Fn(&EvolutionProgress),
    {
        let unenforced = self.params.constraints.unenforced();
        if !unenforced.is_empty() {
            log::warn!("Constraints not enforced by the fitness function: {unenforced:?}");
        }
        log::info!(
            "Optimizing project '{}': population {}, up to {} generations, {:?} objective",
            project_id,
            self.config.population_size,
            self.config.generations,
            self.params.objective_function
        );

        self.initialize();
        callback(&self.progress(EvolutionPhase::Initializing));

        // Evaluation passes are bounded by the generation budget, but at least one runs.
        let max_passes = self.config.generations.max(1);

        let (stop_reason, metrics) = loop {
            let metrics = self.evaluate_population();
            let record = generation_record(self.generation, &self.population);
            self.history.push(record);
            log::debug!(
                "Generation {}: best {:.4}, mean {:.4}, diversity {:.3}",
                record.generation,
                record.best_fitness,
                record.mean_fitness,
                record.diversity
            );

            callback(&self.progress(EvolutionPhase::Evaluating));

            if self.monitor.has_converged(&self.history) {
                callback(&self.progress(EvolutionPhase::Converged));
                break (StopReason::Converged, metrics);
            }
            if self.history.len() >= max_passes {
                break (StopReason::MaxGenerations, metrics);
            }
            callback(&self.progress(EvolutionPhase::Continuing));

            if self.cancelled.load(Ordering::Relaxed) {
                log::info!("Optimization cancelled at generation {}", self.generation);
                return Err(OptimizeError::Cancelled {
                    generation: self.generation,
                });
            }

            self.step_generation();
        };

        callback(&self.progress(EvolutionPhase::Synthesizing));

        // Find best genome and re-score it
        let best_idx = metrics
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.overall_fitness.total_cmp(&b.1.overall_fitness))
            .map_or(0, |(i, _)| i);
        let mut best_genome = self.population.get(best_idx).cloned().unwrap_or_default();
        let best_fitness = self.evaluator.evaluate(&best_genome);
        best_genome.fitness = Some(best_fitness.overall_fitness);

        let final_design = synthesize(&best_genome, &best_fitness);

        let result = SimulationResult {
            id: next_run_id(),
            project_id: project_id.to_string(),
            generation: self.generation,
            best_genome,
            best_fitness,
            convergence_rate: convergence_rate(&self.history),
            evolution_history: self.history.clone(),
            final_design,
            stop_reason,
        };

        log::info!(
            "Run {} finished after generation {} ({:?}): best fitness {:.4}",
            result.id,
            result.generation,
            stop_reason,
            result.best_fitness.overall_fitness
        );
        callback(&self.progress(EvolutionPhase::Done));

        Ok(result)
    }

    /// Run the optimization (blocking).
    pub fn run(&mut self, project_id: &str) -> Result<SimulationResult, OptimizeError> {
        self.run_with_callback(project_id, |_| {})
    }
}
